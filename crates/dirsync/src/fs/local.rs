//! Real filesystem backend

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;
use walkdir::WalkDir;

use super::FileSystem;

/// [`FileSystem`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new local filesystem handle
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// List the direct children of `dir` whose file type passes `keep`
    ///
    /// Symlinks are never followed, so they are only listed if `keep`
    /// accepts the link itself.
    fn list_entries(dir: &Path, keep: impl Fn(&fs::FileType) -> bool) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            if keep(&entry.file_type()) {
                names.push(entry.file_name().to_os_string());
            } else if entry.path_is_symlink() {
                tracing::debug!(path = %entry.path().display(), "not following symlink");
            }
        }

        Ok(names)
    }
}

impl FileSystem for LocalFs {
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        if path.exists() {
            dunce::canonicalize(path)
        } else {
            std::path::absolute(path)
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dirs(&self, path: &Path) -> io::Result<Vec<OsString>> {
        Self::list_entries(path, fs::FileType::is_dir)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<OsString>> {
        Self::list_entries(path, fs::FileType::is_file)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()> {
        let metadata = fs::metadata(from)?;
        fs::copy(from, to)?;

        filetime::set_file_times(
            to,
            FileTime::from_last_access_time(&metadata),
            FileTime::from_last_modification_time(&metadata),
        )
    }
}
