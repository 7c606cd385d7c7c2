//! find-angular: pairwise angular separation over a star catalog
//!
//! Loads the catalog, runs the all-pairs pass with the requested number of
//! threads and prints the average, minimum and maximum separation.

mod cli;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use celestial_catalog::Catalog;
use celestial_separation::error::EXIT_FAILURE;
use celestial_separation::{compute, EngineConfig, GreatCircle, Report, SeparationError, WorkerCount};
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(cli::normalize_args(std::env::args())) {
        Ok(cli) => cli,
        // --help and --version print to stdout and exit 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), SeparationError> {
    let workers = match cli.threads {
        Some(requested) => {
            let workers = WorkerCount::try_from(requested)?;
            println!("{} threads will be used.\n", workers);
            workers
        }
        None => WorkerCount::SEQUENTIAL,
    };
    let config = EngineConfig::new(workers, cli.strategy);

    let catalog = Catalog::open(&cli.catalog)?;
    println!("{} records read", catalog.len());

    let start = Instant::now();
    let summary = compute(&catalog, &config, &GreatCircle)?;
    let report = Report::new(summary, start.elapsed());

    if cli.verbose {
        eprintln!(
            "Pairs visited: {} of {} (strategy {}, {}/{} workers finished)",
            summary.stats.count(),
            summary.expected_pairs(),
            config.strategy,
            summary.workers_completed,
            config.workers
        );
    }

    print!("{}", report);
    Ok(())
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log filter {:?}", default_level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
}
