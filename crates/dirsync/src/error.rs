use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using [`SyncError`]
pub type Result<T> = std::result::Result<T, SyncError>;

/// Filesystem operation that was being performed when an I/O error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOperation {
    /// Resolving a root to an absolute path
    ResolvePath,
    /// Creating a directory and its ancestors
    CreateDirectory,
    /// Listing the entries of a directory
    ListDirectory,
    /// Querying a file's modification time
    ReadModifiedTime,
    /// Copying a file together with its timestamps
    CopyFile,
}

impl fmt::Display for FsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ResolvePath => "resolve path",
            Self::CreateDirectory => "create directory",
            Self::ListDirectory => "list directory",
            Self::ReadModifiedTime => "read modification time of",
            Self::CopyFile => "copy file to",
        };
        f.write_str(s)
    }
}

/// Errors raised by a sync pass
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source root does not exist
    #[error("Source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    /// The source root exists but is not a directory
    #[error("Source path is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    /// A filesystem operation failed mid-pass
    #[error("Failed to {operation} {}", path.display())]
    Filesystem {
        /// What was being attempted
        operation: FsOperation,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Wrap an I/O error with the operation and path it came from
    pub fn filesystem(operation: FsOperation, path: &Path, source: io::Error) -> Self {
        Self::Filesystem {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error was raised by source validation, before any traversal
    #[must_use]
    pub const fn is_invalid_source(&self) -> bool {
        matches!(self, Self::SourceMissing(_) | Self::SourceNotDirectory(_))
    }
}

/// Attach an [`FsOperation`] and path to an I/O result
pub(crate) trait IoResultExt<T> {
    fn during(self, operation: FsOperation, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn during(self, operation: FsOperation, path: &Path) -> Result<T> {
        self.map_err(|e| SyncError::filesystem(operation, path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_source_kinds() {
        assert!(SyncError::SourceMissing(PathBuf::from("/nope")).is_invalid_source());
        assert!(SyncError::SourceNotDirectory(PathBuf::from("/file")).is_invalid_source());

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = SyncError::filesystem(FsOperation::CopyFile, Path::new("/t/a.txt"), io_err);
        assert!(!err.is_invalid_source());
    }

    #[test]
    fn test_error_messages() {
        let err = SyncError::SourceMissing(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "Source directory does not exist: /missing");

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = SyncError::filesystem(FsOperation::CreateDirectory, Path::new("/t/sub"), io_err);
        assert_eq!(err.to_string(), "Failed to create directory /t/sub");
        assert!(std::error::Error::source(&err).is_some());
    }
}
