//! One-way sync pass - walks the source tree and replicates it into the target

use std::path::{Path, PathBuf};

use super::actions::SyncActionResolver;
use super::executor::FileOperationExecutor;
use super::reporting::{ConsoleReporter, SyncObserver};
use super::{SyncOptions, SyncStats};
use crate::comparison::TimestampComparator;
use crate::error::{FsOperation, IoResultExt, Result, SyncError};
use crate::fs::{FileSystem, PlannedFs};

/// Copies missing and newer files from a source tree into a target tree
pub struct TreeSyncer<F> {
    fs: F,
    options: SyncOptions,
}

impl<F: FileSystem> TreeSyncer<F> {
    /// Create a new syncer over the given filesystem
    #[must_use]
    pub const fn new(fs: F, options: SyncOptions) -> Self {
        Self { fs, options }
    }

    /// Run one pass, printing action lines to stdout when verbose
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::SourceMissing`] or [`SyncError::SourceNotDirectory`]
    /// before anything is written if the source is unusable, or
    /// [`SyncError::Filesystem`] if any filesystem operation fails mid-pass.
    pub fn sync(&self, source_root: &Path, target_root: &Path) -> Result<SyncStats> {
        let mut reporter = ConsoleReporter::new(self.options);
        self.sync_with_observer(source_root, target_root, &mut reporter)
    }

    /// Run one pass, reporting every action to `observer`
    ///
    /// In dry-run mode the pass runs over an overlay that records writes
    /// instead of applying them, so every decision matches a real run but
    /// nothing reaches the disk.
    ///
    /// # Errors
    ///
    /// Same as [`TreeSyncer::sync`].
    pub fn sync_with_observer(
        &self,
        source_root: &Path,
        target_root: &Path,
        observer: &mut dyn SyncObserver,
    ) -> Result<SyncStats> {
        if self.options.dry_run {
            let planned = PlannedFs::new(&self.fs);
            run_pass(&planned, self.options, source_root, target_root, observer)
        } else {
            run_pass(&self.fs, self.options, source_root, target_root, observer)
        }
    }
}

/// Run one pass over `fs`, which may already hold planned dry-run writes
pub(crate) fn run_pass<F: FileSystem + ?Sized>(
    fs: &F,
    options: SyncOptions,
    source_root: &Path,
    target_root: &Path,
    observer: &mut dyn SyncObserver,
) -> Result<SyncStats> {
    let executor = FileOperationExecutor::new(fs);
    let (source, target) = prepare_roots(fs, &executor, source_root, target_root)?;

    tracing::info!(
        source = %source.display(),
        target = %target.display(),
        dry_run = options.dry_run,
        "starting sync pass"
    );

    let mut walk = Walk {
        fs,
        executor,
        source_root: &source,
        target_root: &target,
        observer,
        stats: SyncStats::default(),
    };
    walk.visit_dir(Path::new(""))?;
    let stats = walk.stats;

    tracing::info!(
        copied = stats.copied,
        updated = stats.updated,
        skipped = stats.skipped,
        "sync pass finished"
    );

    Ok(stats)
}

/// Validate the source, create the target, and resolve both roots
fn prepare_roots<F: FileSystem + ?Sized>(
    fs: &F,
    executor: &FileOperationExecutor<'_, F>,
    source_root: &Path,
    target_root: &Path,
) -> Result<(PathBuf, PathBuf)> {
    if !fs.exists(source_root) {
        return Err(SyncError::SourceMissing(source_root.to_path_buf()));
    }
    if !fs.is_dir(source_root) {
        return Err(SyncError::SourceNotDirectory(source_root.to_path_buf()));
    }

    let source = fs
        .resolve(source_root)
        .during(FsOperation::ResolvePath, source_root)?;

    executor.ensure_dir(target_root)?;
    let target = fs
        .resolve(target_root)
        .during(FsOperation::ResolvePath, target_root)?;

    Ok((source, target))
}

/// State of one depth-first traversal
struct Walk<'a, 'o, F: ?Sized> {
    fs: &'a F,
    executor: FileOperationExecutor<'a, F>,
    source_root: &'a Path,
    target_root: &'a Path,
    observer: &'o mut dyn SyncObserver,
    stats: SyncStats,
}

impl<F: FileSystem + ?Sized> Walk<'_, '_, F> {
    /// Mirror one source directory, its files first, then its subdirectories
    fn visit_dir(&mut self, relative: &Path) -> Result<()> {
        let source_dir = under(self.source_root, relative);
        let target_dir = under(self.target_root, relative);

        self.executor.ensure_dir(&target_dir)?;

        let files = self
            .fs
            .list_files(&source_dir)
            .during(FsOperation::ListDirectory, &source_dir)?;
        for name in files {
            self.visit_file(&relative.join(name))?;
        }

        let dirs = self
            .fs
            .list_dirs(&source_dir)
            .during(FsOperation::ListDirectory, &source_dir)?;
        for name in dirs {
            let child = relative.join(name);
            if under(self.source_root, &child) == self.target_root {
                tracing::warn!(
                    path = %child.display(),
                    "target lies inside source, not descending into it"
                );
                continue;
            }
            self.visit_dir(&child)?;
        }

        Ok(())
    }

    fn visit_file(&mut self, relative: &Path) -> Result<()> {
        let source_file = self.source_root.join(relative);
        let target_file = self.target_root.join(relative);

        let freshness = TimestampComparator::compare(self.fs, &source_file, &target_file)?;
        let action = SyncActionResolver::resolve(relative, freshness);
        tracing::debug!(path = %relative.display(), ?freshness, "resolved action");

        self.executor
            .execute(&action, self.source_root, self.target_root, &mut self.stats)?;
        self.observer.action(&action);

        Ok(())
    }
}

/// Join `relative` onto `root`, leaving `root` untouched for the empty path
fn under(root: &Path, relative: &Path) -> PathBuf {
    if relative.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}
