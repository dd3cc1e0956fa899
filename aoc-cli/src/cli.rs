//! CLI argument parsing using clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run
    #[arg(short, long, default_value_t = 2022)]
    pub year: u16,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Cache directory for puzzle inputs
    #[arg(long, default_value = "~/.cache/aoc_solver")]
    pub cache_dir: PathBuf,

    /// Solve a single day from a local input file instead of the cache
    #[arg(short, long, value_name = "FILE", requires = "day")]
    pub input: Option<PathBuf>,

    /// File holding the session cookie, used when AOC_SESSION is unset
    #[arg(long, default_value = "COOKIE")]
    pub session_file: PathBuf,

    /// User ID for cache organization and verification
    #[arg(long)]
    pub user_id: Option<u64>,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter for `env_logger` when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
