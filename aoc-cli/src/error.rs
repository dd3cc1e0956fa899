//! Error types for the CLI

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// User ID mismatch
    #[error("User ID mismatch: expected {expected}, got {actual}")]
    UserIdMismatch { expected: u64, actual: u64 },
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Local input file could not be read
    #[error("Cannot read input file {}: {source}", .path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input fetch failed
    #[error("Input fetch failed for {year}/{day}: {source}")]
    InputFetch {
        year: u16,
        day: u8,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Input is neither cached nor downloadable without a session
    #[error("No input for {year}/{day}: not cached and no session available")]
    MissingSession { year: u16, day: u8 },

    /// Puzzle has not been released yet
    #[error("Puzzle {year}/{day} unlocks at {unlocks_at}")]
    NotYetUnlocked {
        year: u16,
        day: u8,
        unlocks_at: DateTime<Utc>,
    },

    /// Solver execution failed
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Cache write warning (non-fatal)
    #[error("Cache write failed for {year}/{day}: {source}")]
    CacheWrite {
        year: u16,
        day: u8,
        #[source]
        source: CacheError,
    },

    /// Multiple errors collected while running several days
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one
    /// 1. If first is singular and second is Multiple: prepend first to second's vec
    /// 2. If second is singular and first is Multiple: append second to first's vec
    /// 3. If both are Multiple: concat them
    /// 4. If both are singular: create new Multiple with both
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    /// Number of individual errors, flattening `Multiple`
    pub fn count(&self) -> usize {
        match self.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }
}

/// Cache-specific errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache directory creation failed
    #[error("Cache directory creation failed for {}: {source}", .path.display())]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
