use std::path::PathBuf;

use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  # Sync from dirA to dirB (one-way)
  dirsync dirA dirB

  # Sync bidirectionally (make both directories identical)
  dirsync dirA dirB --bidirectional

  # Verbose output
  dirsync dirA dirB -v";

/// Synchronize two directory trees by copying missing or newer files
///
/// Files missing from the target, or modified more recently in the source, are
/// copied into the target with their timestamps preserved. Nothing is deleted.
/// With --bidirectional the target is then synced back into the source.
#[derive(Parser, Debug)]
#[command(name = "dirsync")]
#[command(version, after_help = EXAMPLES)]
pub struct Cli {
    /// Source directory (or first directory for bidirectional sync)
    pub source: PathBuf,

    /// Target directory (or second directory for bidirectional sync)
    pub target: PathBuf,

    /// Perform bidirectional sync (make both directories identical)
    #[arg(short, long)]
    pub bidirectional: bool,

    /// Print detailed information about each file operation
    #[arg(short, long)]
    pub verbose: bool,

    /// Preview changes without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}
