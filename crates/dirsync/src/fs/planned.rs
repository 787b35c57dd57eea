//! Write-recording overlay used for dry runs

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::FileSystem;

/// [`FileSystem`] that reads through to `inner` but only records writes
///
/// Planned directories and copies are visible to later reads, so a second
/// pass over the same overlay sees what the first pass would have written.
/// Nothing is ever written to `inner`.
pub(crate) struct PlannedFs<F> {
    inner: F,
    dirs: RefCell<BTreeSet<PathBuf>>,
    files: RefCell<BTreeMap<PathBuf, SystemTime>>,
}

impl<F: FileSystem> PlannedFs<F> {
    pub(crate) fn new(inner: F) -> Self {
        Self {
            inner,
            dirs: RefCell::new(BTreeSet::new()),
            files: RefCell::new(BTreeMap::new()),
        }
    }

    /// Merge the inner listing of `path` with planned children
    fn merged(
        &self,
        path: &Path,
        inner: io::Result<Vec<OsString>>,
        planned: Vec<OsString>,
    ) -> io::Result<Vec<OsString>> {
        let mut names = if self.inner.is_dir(path) {
            inner?
        } else if self.dirs.borrow().contains(path) {
            Vec::new()
        } else {
            return inner;
        };

        names.extend(planned);
        names.sort();
        names.dedup();
        Ok(names)
    }
}

/// Names of the entries in `paths` whose parent is `dir`
fn children_of<'a>(paths: impl Iterator<Item = &'a PathBuf>, dir: &Path) -> Vec<OsString> {
    paths
        .filter(|p| p.parent() == Some(dir))
        .filter_map(|p| p.file_name().map(ToOwned::to_owned))
        .collect()
}

impl<F: FileSystem> FileSystem for PlannedFs<F> {
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        self.inner.resolve(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
            || self.files.borrow().contains_key(path)
            || self.inner.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path) || self.inner.is_dir(path)
    }

    fn list_dirs(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let planned = children_of(self.dirs.borrow().iter(), path);
        self.merged(path, self.inner.list_dirs(path), planned)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let planned = children_of(self.files.borrow().keys(), path);
        self.merged(path, self.inner.list_files(path), planned)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        match self.files.borrow().get(path) {
            Some(time) => Ok(*time),
            None => self.inner.modified(path),
        }
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty()
                || dirs.contains(ancestor)
                || self.inner.is_dir(ancestor)
            {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()> {
        let modified = self.modified(from)?;
        self.files.borrow_mut().insert(to.to_path_buf(), modified);
        Ok(())
    }
}
