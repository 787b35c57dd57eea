//! Filesystem capability used by the sync engine
//!
//! The engine never touches `std::fs` directly. Everything it needs from the
//! disk goes through [`FileSystem`], so a pass can run against the real
//! filesystem ([`LocalFs`]) or, with the `testing` feature, an in-memory
//! fake (`MemoryFs`).

mod local;
#[cfg(any(test, feature = "testing"))]
mod memory;
mod planned;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub use local::LocalFs;
#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryFs;
pub(crate) use planned::PlannedFs;

/// Directory listing, timestamp and copy primitives needed for a sync pass
pub trait FileSystem {
    /// Resolve a path to an absolute, canonical form
    ///
    /// Paths that do not exist yet are made absolute without touching the disk.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf>;

    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the immediate subdirectories of `path`, sorted
    fn list_dirs(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Names of the regular files directly inside `path`, sorted
    fn list_files(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Last modification time of `path`
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Create `path` and any missing ancestors; no-op if it already exists
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Copy file content from `from` to `to` and carry over its timestamps
    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).resolve(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn list_dirs(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_dirs(path)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_files(path)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        (**self).modified(path)
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        (**self).ensure_dir(path)
    }

    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).copy_with_metadata(from, to)
    }
}
