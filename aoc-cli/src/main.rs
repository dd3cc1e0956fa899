//! AOC CLI - Command-line interface for running Advent of Code solvers

mod cache;
mod cli;
mod config;
mod error;
mod executor;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use chrono::Utc;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use output::Reporter;

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.tags)?;
    let mut executor = Executor::new(registry, &config)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing_inputs = executor.missing_inputs(&work_items, Utc::now());
    if !missing_inputs.is_empty() && !config.quiet {
        println!("Missing {} input file(s):", missing_inputs.len());
        for (year, day) in &missing_inputs {
            println!("  - {}/day{:02}", year, day);
        }
    }

    if !missing_inputs.is_empty() {
        if executor.has_session() {
            log::info!("fetching missing inputs with the provided session");
        } else {
            let session = config::prompt_session(
                "Session token required to fetch missing inputs from adventofcode.com",
            )?;
            let expected = if config.user_id_provided {
                config.user_id
            } else {
                None
            };
            let user_id = config::verify_session(&session, expected)?;
            executor.update_session(session, user_id)?;
        }
    }

    let mut reporter = Reporter::stdio(config.quiet);
    let mut write_error = None;
    let outcome = executor.execute(|result| {
        if let Err(e) = reporter.report(&result)
            && write_error.is_none()
        {
            write_error = Some(e);
        }
    });

    if let Some(e) = write_error {
        return Err(CliError::Config(format!("Cannot write results: {e}")));
    }
    if let Err(e) = outcome {
        log::warn!("{} day(s) could not be run", e.count());
    }
    log::debug!("{} part(s) solved, {} failed", reporter.solved(), reporter.failed());
    reporter
        .print_summary()
        .map_err(|e| CliError::Config(format!("Cannot write summary: {e}")))
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
