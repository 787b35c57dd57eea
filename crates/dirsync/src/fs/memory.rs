//! In-memory filesystem backend

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use super::FileSystem;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File { content: Vec<u8>, modified: SystemTime },
}

/// Fake [`FileSystem`] held entirely in memory, for tests only
///
/// Only built with the `testing` feature. Paths are absolute and normalized
/// lexically; there are no symlinks. The setup helpers panic on misuse
/// instead of returning errors.
/// Setup helpers (`add_dir`, `add_file`, `set_modified`) are not counted as
/// writes, only mutations made through the [`FileSystem`] trait are.
#[derive(Debug)]
pub struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    denied: RefCell<BTreeSet<PathBuf>>,
    writes: Cell<usize>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Create an empty filesystem containing only `/`
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir);
        Self {
            nodes: RefCell::new(nodes),
            denied: RefCell::new(BTreeSet::new()),
            writes: Cell::new(0),
        }
    }

    /// Create a directory and its ancestors
    ///
    /// # Panics
    ///
    /// Panics if a file is in the way.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        self.create_dirs(&path)
            .unwrap_or_else(|e| panic!("cannot add directory {}: {e}", path.display()));
    }

    /// Create a file (and its parent directories) with the given content and mtime
    ///
    /// # Panics
    ///
    /// Panics if a file is in the way of a parent directory.
    pub fn add_file(
        &self,
        path: impl AsRef<Path>,
        content: impl Into<Vec<u8>>,
        modified: SystemTime,
    ) {
        let path = normalize(path.as_ref());
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes.borrow_mut().insert(
            path,
            Node::File {
                content: content.into(),
                modified,
            },
        );
    }

    /// Change the modification time of an existing file
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a file.
    pub fn set_modified(&self, path: impl AsRef<Path>, time: SystemTime) {
        let path = normalize(path.as_ref());
        match self.nodes.borrow_mut().get_mut(&path) {
            Some(Node::File { modified, .. }) => *modified = time,
            _ => panic!("not a file: {}", path.display()),
        }
    }

    /// Content of the file at `path`, if there is one
    #[must_use]
    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.nodes.borrow().get(&normalize(path.as_ref())) {
            Some(Node::File { content, .. }) => Some(content.clone()),
            _ => None,
        }
    }

    /// Make every write at or below `path` fail with `PermissionDenied`
    pub fn deny_writes(&self, path: impl AsRef<Path>) {
        self.denied.borrow_mut().insert(normalize(path.as_ref()));
    }

    /// Number of directories created and files copied through [`FileSystem`]
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Relative paths of every file below `root`, sorted
    #[must_use]
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = normalize(root.as_ref());
        self.nodes
            .borrow()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File { .. }))
            .filter_map(|(path, _)| path.strip_prefix(&root).ok().map(Path::to_path_buf))
            .collect()
    }

    /// Relative paths of every directory below `root` (excluding `root`), sorted
    #[must_use]
    pub fn dirs_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = normalize(root.as_ref());
        self.nodes
            .borrow()
            .iter()
            .filter(|(path, node)| matches!(node, Node::Dir) && **path != root)
            .filter_map(|(path, _)| path.strip_prefix(&root).ok().map(Path::to_path_buf))
            .collect()
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.denied.borrow().iter().any(|d| path.starts_with(d)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write denied: {}", path.display()),
            ));
        }
        Ok(())
    }

    /// Create `path` and missing ancestors, returning how many were created
    fn create_dirs(&self, path: &Path) -> io::Result<usize> {
        let mut created = 0;
        let mut nodes = self.nodes.borrow_mut();

        for ancestor in path.ancestors().collect::<Vec<_>>().into_iter().rev() {
            match nodes.get(ancestor) {
                Some(Node::Dir) => {}
                Some(Node::File { .. }) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("file exists: {}", ancestor.display()),
                    ));
                }
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::Dir);
                    created += 1;
                }
            }
        }

        Ok(created)
    }

    fn list_children(&self, path: &Path, want_dirs: bool) -> io::Result<Vec<OsString>> {
        let path = normalize(path);
        let nodes = self.nodes.borrow();

        match nodes.get(&path) {
            Some(Node::Dir) => {}
            Some(Node::File { .. }) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None => return Err(not_found(&path)),
        }

        Ok(nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(path.as_path()))
            .filter(|(_, node)| matches!(node, Node::Dir) == want_dirs)
            .filter_map(|(child, _)| child.file_name().map(ToOwned::to_owned))
            .collect())
    }
}

impl FileSystem for MemoryFs {
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(normalize(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(&normalize(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.borrow().get(&normalize(path)), Some(Node::Dir))
    }

    fn list_dirs(&self, path: &Path) -> io::Result<Vec<OsString>> {
        self.list_children(path, true)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<OsString>> {
        self.list_children(path, false)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        let path = normalize(path);
        match self.nodes.borrow().get(&path) {
            Some(Node::File { modified, .. }) => Ok(*modified),
            Some(Node::Dir) => Ok(SystemTime::UNIX_EPOCH),
            None => Err(not_found(&path)),
        }
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        if self.is_dir(&path) {
            return Ok(());
        }
        self.check_writable(&path)?;

        let created = self.create_dirs(&path)?;
        self.writes.set(self.writes.get() + created);
        Ok(())
    }

    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()> {
        let from = normalize(from);
        let to = normalize(to);
        self.check_writable(&to)?;

        let source = match self.nodes.borrow().get(&from) {
            Some(node @ Node::File { .. }) => node.clone(),
            Some(Node::Dir) => {
                return Err(io::Error::new(
                    io::ErrorKind::IsADirectory,
                    format!("is a directory: {}", from.display()),
                ));
            }
            None => return Err(not_found(&from)),
        };

        let mut nodes = self.nodes.borrow_mut();
        match to.parent().and_then(|parent| nodes.get(parent)) {
            Some(Node::Dir) => {}
            _ => return Err(not_found(&to)),
        }
        if let Some(Node::Dir) = nodes.get(&to) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", to.display()),
            ));
        }

        nodes.insert(to, source);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

/// Lexically normalize `path` into an absolute path rooted at `/`
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::from("/");
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::ParentDir => {
                out.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    out
}
