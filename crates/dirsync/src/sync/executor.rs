//! File operations executor

use std::path::Path;

use super::SyncStats;
use super::actions::SyncAction;
use crate::error::{FsOperation, IoResultExt, Result};
use crate::fs::FileSystem;

/// Applies sync actions to the target tree
///
/// Dry runs hand this a write-recording filesystem, so the executor itself
/// never needs to know whether writes are real.
pub(crate) struct FileOperationExecutor<'a, F: ?Sized> {
    fs: &'a F,
}

impl<'a, F: FileSystem + ?Sized> FileOperationExecutor<'a, F> {
    pub(crate) const fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Execute a sync action and count it
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    pub(crate) fn execute(
        &self,
        action: &SyncAction,
        source_root: &Path,
        target_root: &Path,
        stats: &mut SyncStats,
    ) -> Result<()> {
        match action {
            SyncAction::Copy { source, target } => {
                self.copy_file(&source_root.join(source), &target_root.join(target))?;
                stats.copied += 1;
            }
            SyncAction::Update { source, target } => {
                self.copy_file(&source_root.join(source), &target_root.join(target))?;
                stats.updated += 1;
            }
            SyncAction::Skip { .. } => {
                stats.skipped += 1;
            }
        }
        Ok(())
    }

    /// Ensure a target directory exists
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub(crate) fn ensure_dir(&self, path: &Path) -> Result<()> {
        self.fs
            .ensure_dir(path)
            .during(FsOperation::CreateDirectory, path)
    }

    fn copy_file(&self, source: &Path, target: &Path) -> Result<()> {
        self.fs
            .copy_with_metadata(source, target)
            .during(FsOperation::CopyFile, target)
    }
}
