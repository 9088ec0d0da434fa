//! `life`: run Conway's Game of Life on an NPY grid.
//!
//! Loads a binary grid (or generates one), computes the requested number of
//! generations, prints the wall-clock time of the iteration loop, and saves
//! the final grid.
//!
//! # Startup Sequence
//!
//! 1. Parse the command line
//! 2. Load configuration from `life-config.yaml` or `--config`
//! 3. Initialize structured logging (tracing) on stderr
//! 4. Resolve settings: command line over config over defaults
//! 5. Load, iterate, time, and save
//!
//! Every failure exits with code 1.

mod app;
mod args;
mod config;
mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app::Settings;
use crate::args::Cli;
use crate::config::LifeConfig;
use crate::error::CliError;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // `--help` and `--version` also arrive here.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "life failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = LifeConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::resolve(cli, &config)?;
    info!(
        iterations = settings.iterations,
        boundary = %settings.boundary,
        "Configuration loaded"
    );

    let stdout = std::io::stdout();
    let report = app::execute(&settings, &mut stdout.lock())?;
    info!(
        generation = report.summary.generation,
        live_cells = report.summary.live_cells,
        elapsed_secs = report.elapsed.as_secs_f64(),
        saved = report.saved_to.is_some(),
        "Run complete"
    );
    Ok(())
}
