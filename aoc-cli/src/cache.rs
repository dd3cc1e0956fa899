//! Input cache for storing puzzle inputs locally

use crate::error::CacheError;
use std::fs;
use std::path::PathBuf;

/// File-based cache for puzzle inputs
///
/// Directory structure: `{base_dir}/{user_id}/{year}_day{day:02}.txt`
pub struct InputCache {
    /// Pre-computed user directory: `{base_dir}/{user_id}`
    user_dir: PathBuf,
}

impl InputCache {
    /// Create a new input cache for a specific user
    pub fn new(mut base_dir: PathBuf, user_id: u64) -> Self {
        base_dir.push(user_id.to_string());
        Self { user_dir: base_dir }
    }

    /// Get the cache path for a specific year/day
    pub fn cache_path(&self, year: u16, day: u8) -> PathBuf {
        self.user_dir.join(format!("{}_day{:02}.txt", year, day))
    }

    /// Check if input is cached
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.cache_path(year, day).is_file()
    }

    /// Get cached input or None if not cached
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, CacheError> {
        let path = self.cache_path(year, day);
        if !path.is_file() {
            log::info!("cache miss for {year}/{day:02}");
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        log::info!("cache hit for {year}/{day:02} at {}", path.display());
        Ok(Some(content))
    }

    /// Store input in cache, creating the user directory if needed
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.user_dir).map_err(|source| CacheError::DirCreation {
            path: self.user_dir.clone(),
            source,
        })?;
        fs::write(self.cache_path(year, day), input)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cache_path_format() {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().to_path_buf(), 12345);

        assert_eq!(
            cache.cache_path(2022, 1),
            temp.path().join("12345").join("2022_day01.txt")
        );
        assert_eq!(
            cache.cache_path(2022, 25),
            temp.path().join("12345").join("2022_day25.txt")
        );
    }

    #[test]
    fn test_cache_roundtrip() {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().to_path_buf(), 12345);

        assert!(!cache.contains(2022, 12));
        assert!(cache.get(2022, 12).unwrap().is_none());

        let input = "Sabqponm\nabcryxxl\n";
        cache.put(2022, 12, input).unwrap();

        assert!(cache.contains(2022, 12));
        assert_eq!(cache.get(2022, 12).unwrap(), Some(input.to_string()));
        assert!(!cache.contains(2022, 11));
    }

    #[test]
    fn test_users_do_not_share_inputs() {
        let temp = TempDir::new().unwrap();
        let alice = InputCache::new(temp.path().to_path_buf(), 1);
        let bob = InputCache::new(temp.path().to_path_buf(), 2);

        alice.put(2022, 1, "1000").unwrap();
        assert!(alice.contains(2022, 1));
        assert!(!bob.contains(2022, 1));
    }

    #[test]
    fn test_put_reports_unwritable_directory() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let cache = InputCache::new(blocker, 7);
        assert!(matches!(
            cache.put(2022, 1, "1000"),
            Err(CacheError::DirCreation { .. })
        ));
    }
}
