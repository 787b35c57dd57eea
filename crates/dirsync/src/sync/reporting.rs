//! Sync operation reporting and statistics

use std::fmt;
use std::path::Path;

use super::actions::SyncAction;
use super::{BidirectionalReport, SyncOptions, SyncStats};

/// Pass of a bidirectional sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First pass, directory A into directory B
    AToB,
    /// Second pass, directory B back into directory A
    BToA,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AToB => f.write_str("Phase 1: Syncing A -> B"),
            Self::BToA => f.write_str("Phase 2: Syncing B -> A"),
        }
    }
}

/// Receives progress from a running sync
///
/// All methods default to doing nothing.
pub trait SyncObserver {
    /// A bidirectional phase is about to run
    fn phase_started(&mut self, _phase: Phase) {}

    /// An action was applied (or would have been, in dry-run mode)
    fn action(&mut self, _action: &SyncAction) {}

    /// A bidirectional phase finished successfully
    fn phase_finished(&mut self, _phase: Phase, _stats: &SyncStats) {}
}

/// Observer that prints progress to stdout
///
/// Action lines are only printed in verbose mode.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    options: SyncOptions,
}

impl ConsoleReporter {
    /// Create a reporter for the given options
    #[must_use]
    pub const fn new(options: SyncOptions) -> Self {
        Self { options }
    }
}

impl SyncObserver for ConsoleReporter {
    fn phase_started(&mut self, phase: Phase) {
        println!("{phase}");
    }

    fn action(&mut self, action: &SyncAction) {
        if self.options.verbose {
            println!("{}", SyncReporter::describe(action, self.options.dry_run));
        }
    }

    fn phase_finished(&mut self, _phase: Phase, stats: &SyncStats) {
        println!("{}", SyncReporter::counts(stats));
    }
}

/// Formats the text shown to the user
pub struct SyncReporter;

impl SyncReporter {
    /// One line describing an action
    #[must_use]
    pub fn describe(action: &SyncAction, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };
        match action {
            SyncAction::Copy { source, target } => format!(
                "{prefix}Copied: {} -> {}",
                source.display(),
                target.display()
            ),
            SyncAction::Update { source, target } => format!(
                "{prefix}Updated: {} -> {}",
                source.display(),
                target.display()
            ),
            SyncAction::Skip { path } => {
                format!("{prefix}Skipped: {} (up to date)", path.display())
            }
        }
    }

    /// Indented copied/updated/skipped counts
    #[must_use]
    pub fn counts(stats: &SyncStats) -> String {
        let mut output = String::new();
        output.push_str(&format!("  Copied: {} files\n", stats.copied));
        output.push_str(&format!("  Updated: {} files\n", stats.updated));
        output.push_str(&format!("  Skipped: {} files\n", stats.skipped));
        output
    }

    /// Banner printed before a one-way sync
    #[must_use]
    pub fn one_way_header(source: &Path, target: &Path) -> String {
        format!(
            "Synchronizing from {} to {}\n",
            source.display(),
            target.display()
        )
    }

    /// Summary printed after a one-way sync
    #[must_use]
    pub fn one_way_summary(stats: &SyncStats) -> String {
        format!("Synchronization complete!\n{}", Self::counts(stats))
    }

    /// Banner printed before a bidirectional sync
    #[must_use]
    pub fn bidirectional_header(dir_a: &Path, dir_b: &Path) -> String {
        format!(
            "Synchronizing directories:\n  Directory A: {}\n  Directory B: {}\n",
            dir_a.display(),
            dir_b.display()
        )
    }

    /// Summary printed after a bidirectional sync
    #[must_use]
    pub fn bidirectional_summary(report: &BidirectionalReport) -> String {
        format!(
            "Synchronization complete! Total operations: {}",
            report.total_operations()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_describe_actions() {
        let copy = SyncAction::Copy {
            source: PathBuf::from("a/b.txt"),
            target: PathBuf::from("a/b.txt"),
        };
        let skip = SyncAction::Skip {
            path: PathBuf::from("c.txt"),
        };

        assert_eq!(SyncReporter::describe(&copy, false), "Copied: a/b.txt -> a/b.txt");
        assert_eq!(
            SyncReporter::describe(&copy, true),
            "[DRY RUN] Copied: a/b.txt -> a/b.txt"
        );
        assert_eq!(SyncReporter::describe(&skip, false), "Skipped: c.txt (up to date)");
    }

    #[test]
    fn test_counts_block() {
        let stats = SyncStats {
            copied: 5,
            updated: 3,
            skipped: 2,
        };

        let counts = SyncReporter::counts(&stats);
        assert!(counts.contains("  Copied: 5 files"));
        assert!(counts.contains("  Updated: 3 files"));
        assert!(counts.contains("  Skipped: 2 files"));
        assert!(SyncReporter::one_way_summary(&stats).starts_with("Synchronization complete!\n"));
    }

    #[test]
    fn test_bidirectional_summary_total() {
        let report = BidirectionalReport {
            a_to_b: SyncStats {
                copied: 1,
                updated: 2,
                skipped: 7,
            },
            b_to_a: SyncStats {
                copied: 3,
                updated: 0,
                skipped: 4,
            },
        };

        assert_eq!(
            SyncReporter::bidirectional_summary(&report),
            "Synchronization complete! Total operations: 6"
        );
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::AToB.to_string(), "Phase 1: Syncing A -> B");
        assert_eq!(Phase::BToA.to_string(), "Phase 2: Syncing B -> A");
    }
}
