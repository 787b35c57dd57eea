//! File timestamp comparison for deciding whether a target copy is stale
//!
//! Only modification times are compared. Content is never read, so two files
//! with equal timestamps are considered in sync even if their bytes differ.

use std::path::Path;
use std::time::SystemTime;

use crate::error::{FsOperation, IoResultExt, Result};
use crate::fs::FileSystem;

/// How a source file relates to its counterpart in the target tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Nothing exists at the target path
    TargetMissing,
    /// Source was modified strictly later than the target
    SourceNewer,
    /// Target is as new as the source, or newer
    UpToDate,
}

/// Timestamp comparator
pub struct TimestampComparator;

impl TimestampComparator {
    /// Compare a source file against the corresponding target path
    ///
    /// # Errors
    ///
    /// Returns an error if a modification time cannot be read.
    pub fn compare<F: FileSystem + ?Sized>(
        fs: &F,
        source: &Path,
        target: &Path,
    ) -> Result<Freshness> {
        if !fs.exists(target) {
            return Ok(Freshness::TargetMissing);
        }

        let source_time = Self::modified_time(fs, source)?;
        let target_time = Self::modified_time(fs, target)?;

        Ok(Self::classify(source_time, target_time))
    }

    /// Strict comparison: equal timestamps count as up to date
    #[must_use]
    pub fn classify(source_time: SystemTime, target_time: SystemTime) -> Freshness {
        if source_time > target_time {
            Freshness::SourceNewer
        } else {
            Freshness::UpToDate
        }
    }

    /// Get the modification time of a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file's metadata cannot be read.
    pub fn modified_time<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<SystemTime> {
        fs.modified(path).during(FsOperation::ReadModifiedTime, path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use filetime::{FileTime, set_file_mtime};
    use tempfile::TempDir;

    use super::*;
    use crate::fs::{LocalFs, MemoryFs};

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_classify_strictly_newer() {
        let base = at(1_000);
        assert_eq!(
            TimestampComparator::classify(base + Duration::from_nanos(1), base),
            Freshness::SourceNewer
        );
        assert_eq!(TimestampComparator::classify(base, base), Freshness::UpToDate);
        assert_eq!(
            TimestampComparator::classify(base, base + Duration::from_secs(1)),
            Freshness::UpToDate
        );
    }

    #[test]
    fn test_target_missing() {
        let fs = MemoryFs::new();
        fs.add_file("/src/a.txt", "a", at(10));

        let freshness =
            TimestampComparator::compare(&fs, Path::new("/src/a.txt"), Path::new("/dst/a.txt"))
                .unwrap();
        assert_eq!(freshness, Freshness::TargetMissing);
    }

    #[test]
    fn test_source_newer_on_disk() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source.txt");
        let target = tmp.path().join("target.txt");
        fs::write(&source, "new").unwrap();
        fs::write(&target, "old").unwrap();

        set_file_mtime(&target, FileTime::from_unix_time(1_000_000, 0)).unwrap();
        set_file_mtime(&source, FileTime::from_unix_time(1_000_001, 0)).unwrap();

        let freshness = TimestampComparator::compare(&LocalFs::new(), &source, &target).unwrap();
        assert_eq!(freshness, Freshness::SourceNewer);
    }

    #[test]
    fn test_target_newer_on_disk() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source.txt");
        let target = tmp.path().join("target.txt");
        fs::write(&source, "old").unwrap();
        fs::write(&target, "new").unwrap();

        set_file_mtime(&source, FileTime::from_unix_time(1_000_000, 0)).unwrap();
        set_file_mtime(&target, FileTime::from_unix_time(1_000_001, 0)).unwrap();

        let freshness = TimestampComparator::compare(&LocalFs::new(), &source, &target).unwrap();
        assert_eq!(freshness, Freshness::UpToDate);
    }

    #[test]
    fn test_nonexistent_source() {
        let fs = MemoryFs::new();
        fs.add_file("/dst/a.txt", "a", at(10));

        let result =
            TimestampComparator::compare(&fs, Path::new("/src/a.txt"), Path::new("/dst/a.txt"));
        assert!(matches!(
            result,
            Err(crate::SyncError::Filesystem {
                operation: FsOperation::ReadModifiedTime,
                ..
            })
        ));
    }
}
