//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable checked for the session cookie before the session file
pub const SESSION_ENV: &str = "AOC_SESSION";

/// Resolved runtime configuration
pub struct Config {
    /// Year to run
    pub year: u16,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Cache directory path
    pub cache_dir: PathBuf,
    /// Local input file, bypassing cache and download
    pub input_file: Option<PathBuf>,
    /// User ID for cache organization; unresolved when solving a local file
    pub user_id: Option<u64>,
    /// Whether user ID was explicitly provided (vs derived from session)
    pub user_id_provided: bool,
    /// Session key (zeroized on drop)
    pub session: Zeroizing<String>,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, resolving session and user ID
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let cache_dir = expand_tilde(&args.cache_dir);
        let session = read_session(std::env::var(SESSION_ENV).ok(), &args.session_file);

        let user_id = if args.input.is_some() {
            args.user_id
        } else {
            Some(resolve_user_id(args.user_id, &session)?)
        };

        Ok(Config {
            year: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            cache_dir,
            input_file: args.input,
            user_id,
            user_id_provided: args.user_id.is_some(),
            session,
            quiet: args.quiet,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Session from the environment, else the trimmed session file, else empty
fn read_session(env_session: Option<String>, session_file: &Path) -> Zeroizing<String> {
    if let Some(session) = env_session.map(Zeroizing::new)
        && !session.trim().is_empty()
    {
        log::debug!("using session from {SESSION_ENV}");
        return Zeroizing::new(session.trim().to_string());
    }

    match fs::read_to_string(session_file) {
        Ok(contents) => {
            let contents = Zeroizing::new(contents);
            log::debug!("using session from {}", session_file.display());
            Zeroizing::new(contents.trim().to_string())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Zeroizing::new(String::new()),
        Err(e) => {
            log::warn!("cannot read session file {}: {e}", session_file.display());
            Zeroizing::new(String::new())
        }
    }
}

/// User ID from the flag, else from the session, else from stdin
fn resolve_user_id(provided: Option<u64>, session: &str) -> Result<u64, CliError> {
    match (provided, session.is_empty()) {
        (Some(uid), true) => Ok(uid),
        (expected, false) => verify_session(session, expected),
        (None, true) => prompt_user_id(),
    }
}

/// Prompt user for their AOC user ID
fn prompt_user_id() -> Result<u64, CliError> {
    use std::io::Write;
    println!("No user ID provided. Enter your AOC user ID (found in your profile URL).");
    print!("User ID: ");
    std::io::stdout().flush().ok();

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::Config(format!("Failed to read user ID: {}", e)))?;

    parse_user_id(&input)
}

fn parse_user_id(input: &str) -> Result<u64, CliError> {
    input
        .trim()
        .parse()
        .map_err(|_| CliError::Config("Invalid user ID: must be a number".to_string()))
}

/// Prompt user for session token
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    println!("{}", reason);
    let s = Zeroizing::new(
        rpassword::prompt_password("Enter AOC session key: ")
            .map_err(|e| CliError::Config(format!("Failed to read session: {}", e)))?,
    );
    if s.trim().is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(Zeroizing::new(s.trim().to_string()))
}

/// Verify session and optionally check user ID match
pub fn verify_session(session: &str, expected_user_id: Option<u64>) -> Result<u64, CliError> {
    let client = aoc_http_client::AocClient::new()?;
    let info = client.verify_session(session)?;
    let actual_uid = info
        .user_id
        .ok_or_else(|| CliError::Config("Invalid session: could not fetch user ID".to_string()))?;
    check_user_id(expected_user_id, actual_uid)?;
    log::info!("session belongs to user {actual_uid}");
    Ok(actual_uid)
}

fn check_user_id(expected: Option<u64>, actual: u64) -> Result<(), CliError> {
    match expected {
        Some(expected) if expected != actual => Err(CliError::UserIdMismatch { expected, actual }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_expand_tilde() {
        let plain = PathBuf::from("/tmp/aoc");
        assert_eq!(expand_tilde(&plain), plain);
        assert_eq!(expand_tilde(Path::new("cache")), PathBuf::from("cache"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/.cache/aoc")), home.join(".cache/aoc"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }

    #[test]
    fn test_session_prefers_environment() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("COOKIE");
        fs::write(&file, "from-file\n").unwrap();

        let session = read_session(Some(" from-env ".to_string()), &file);
        assert_eq!(session.as_str(), "from-env");
    }

    #[test]
    fn test_session_falls_back_to_trimmed_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("COOKIE");
        fs::write(&file, "  abc123\n").unwrap();

        assert_eq!(read_session(None, &file).as_str(), "abc123");
        assert_eq!(read_session(Some("   ".to_string()), &file).as_str(), "abc123");
    }

    #[test]
    fn test_session_missing_everywhere_is_empty() {
        let temp = TempDir::new().unwrap();
        let session = read_session(None, &temp.path().join("COOKIE"));
        assert!(session.is_empty());
    }

    #[test]
    fn test_user_id_without_session_uses_flag() {
        assert_eq!(resolve_user_id(Some(42), "").unwrap(), 42);
    }

    #[test]
    fn test_parse_and_check_user_id() {
        assert_eq!(parse_user_id(" 1234\n").unwrap(), 1234);
        assert!(matches!(parse_user_id("abc"), Err(CliError::Config(_))));

        assert!(check_user_id(None, 5).is_ok());
        assert!(check_user_id(Some(5), 5).is_ok());
        assert!(matches!(
            check_user_id(Some(5), 6),
            Err(CliError::UserIdMismatch {
                expected: 5,
                actual: 6
            })
        ));
    }

    #[test]
    fn test_local_input_skips_user_resolution() {
        let temp = TempDir::new().unwrap();
        let args = Args::try_parse_from([
            "aoc",
            "--day",
            "12",
            "--input",
            "day12.txt",
            "--session-file",
            temp.path().join("COOKIE").to_str().unwrap(),
            "--cache-dir",
            temp.path().to_str().unwrap(),
        ])
        .unwrap();

        // AOC_SESSION may be set in the environment; the user ID stays unresolved either way
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.user_id, None);
        assert!(!config.user_id_provided);
        assert_eq!(config.input_file, Some(PathBuf::from("day12.txt")));
        assert_eq!(config.day_filter, Some(12));
        assert_eq!(config.cache_dir, temp.path());
    }
}
