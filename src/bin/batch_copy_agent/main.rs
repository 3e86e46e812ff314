//! # Batch Copy Agent CLI
//!
//! Entry point for both standalone runs and orchestrator-driven mini-batches.
//! Exits 0 when every entry was copied and 1 otherwise.

mod cli;

use anyhow::{bail, Context, Result};
use batch_copy_agent::config::ConfigLoader;
use batch_copy_agent::handler::{CopyJobHandler, MiniBatchHandler};
use batch_copy_agent::logging::init_structured_logging;
use batch_copy_agent::{run_standalone, BatchReport};
use clap::Parser;
use std::ffi::OsString;
use std::process::ExitCode;
use tracing::debug;

use cli::{split_known_args, Cli, Commands, OutputFormat};

fn main() -> ExitCode {
    let (known, ignored) = split_known_args(std::env::args_os().collect());
    let cli = Cli::parse_from(known);

    match run(cli, &ignored) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, ignored: &[OsString]) -> Result<()> {
    let config =
        ConfigLoader::load(&cli.overrides()).context("Failed to load agent configuration")?;
    init_structured_logging(&config);

    if !ignored.is_empty() {
        debug!(?ignored, "Ignoring unrecognized arguments");
    }

    let report = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_standalone(&config).context("Standalone copy failed")?,
        Commands::Batch { paths } => {
            let mut handler = CopyJobHandler::new();
            handler.init(&config)?;
            handler
                .run_with_report(&paths)
                .context("Mini-batch copy failed")?
        }
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
    };

    print_report(&report, cli.format)?;

    if !report.is_success() {
        bail!(
            "{} of {} entries failed",
            report.failed.len(),
            report.attempted()
        );
    }
    Ok(())
}

fn print_report(report: &BatchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            println!(
                "Batch {} {}: {} copied ({} bytes), {} failed",
                report.batch_id,
                report.status(),
                report.succeeded.len(),
                report.bytes_copied,
                report.failed.len()
            );
            for failed in &report.failed {
                println!("  {} [{}] {}", failed.path.display(), failed.kind, failed.message);
            }
        }
    }
    Ok(())
}
