//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `spoofcheck` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing summary and exit code
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use std::process;
use structopt::StructOpt;

use spoofcheck::initialization::init_logger_with;
use spoofcheck::{print_simple_summary, run_assessment, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config: Config = Opt::from_args().into();

    // Initialize logger based on config
    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    match run_assessment(config).await {
        Ok(report) => {
            print_simple_summary(
                report.total,
                report.succeeded,
                report.failed,
                report.elapsed_seconds,
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("spoofcheck error: {:#}", e);
            process::exit(1);
        }
    }
}
