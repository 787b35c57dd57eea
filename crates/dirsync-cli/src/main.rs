mod cli;
mod commands;
mod logging;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use dirsync_core::SyncOptions;

fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();
    logging::init().context("Failed to initialize logging")?;

    let options = SyncOptions::new(cli.verbose, cli.dry_run);

    if cli.bidirectional {
        commands::Bidirectional::execute(&cli.source, &cli.target, options)?;
    } else {
        commands::OneWay::execute(&cli.source, &cli.target, options)?;
    }

    Ok(())
}
