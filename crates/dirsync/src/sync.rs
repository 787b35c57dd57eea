//! Synchronization engine
//!
//! A one-way pass ([`TreeSyncer`]) walks the source tree depth-first and, for
//! every file, copies it when the target has no counterpart, overwrites the
//! target when the source was modified strictly later, and skips it otherwise.
//! Files that exist only in the target are never touched.
//!
//! [`BidirectionalSync`] chains two passes so both trees converge on the union
//! of their contents.

mod actions;
mod bidirectional;
mod executor;
mod orchestrator;
mod reporting;

pub use actions::{SyncAction, SyncActionResolver};
pub use bidirectional::{BidirectionalReport, BidirectionalSync};
pub use orchestrator::TreeSyncer;
pub use reporting::{ConsoleReporter, Phase, SyncObserver, SyncReporter};

/// Run-time options for a sync pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Print one line per visited file
    pub verbose: bool,
    /// Decide and report, but never write
    pub dry_run: bool,
}

impl SyncOptions {
    /// Create new sync options
    #[must_use]
    pub const fn new(verbose: bool, dry_run: bool) -> Self {
        Self { verbose, dry_run }
    }
}

/// Per-pass file counts
///
/// Every visited source file increments exactly one counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Files missing from the target and copied over
    pub copied: usize,
    /// Files overwritten because the source was newer
    pub updated: usize,
    /// Files already up to date
    pub skipped: usize,
}

impl SyncStats {
    /// Files that were copied or updated
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.copied + self.updated
    }

    /// Source files visited during the pass
    #[must_use]
    pub const fn files_visited(&self) -> usize {
        self.copied + self.updated + self.skipped
    }
}
