//! # dirsync-core
//!
//! Core library for timestamp-based directory synchronization.
//!
//! A one-way pass walks a source tree and copies every file that is missing
//! from the target, or newer in the source, into the target tree. A
//! bidirectional sync runs two such passes (A to B, then B to A) so both
//! trees end up holding the union of their files.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types for sync operations
pub mod error;

/// Filesystem capability used by the sync engine
pub mod fs;

/// Modification-time comparison between corresponding files
pub mod comparison;

/// One-way and bidirectional synchronization engine
pub mod sync;

pub use error::{FsOperation, Result, SyncError};
pub use fs::{FileSystem, LocalFs};
pub use sync::{
    BidirectionalReport, BidirectionalSync, ConsoleReporter, Phase, SyncAction, SyncObserver,
    SyncOptions, SyncReporter, SyncStats, TreeSyncer,
};
