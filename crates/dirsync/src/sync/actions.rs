//! Sync action determination logic

use std::path::{Path, PathBuf};

use crate::comparison::Freshness;

/// Action taken for one source file, with paths relative to the tree roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// File was missing from the target and is copied over
    Copy {
        /// Path under the source root
        source: PathBuf,
        /// Path under the target root
        target: PathBuf,
    },
    /// Source is newer, target is overwritten
    Update {
        /// Path under the source root
        source: PathBuf,
        /// Path under the target root
        target: PathBuf,
    },
    /// Target is already up to date
    Skip {
        /// Path under the source root
        path: PathBuf,
    },
}

impl SyncAction {
    /// Source-relative path this action was decided for
    #[must_use]
    pub fn source_path(&self) -> &Path {
        match self {
            Self::Copy { source, .. } | Self::Update { source, .. } => source,
            Self::Skip { path } => path,
        }
    }

    /// Whether this action writes to the target tree
    #[must_use]
    pub const fn is_write(&self) -> bool {
        !matches!(self, Self::Skip { .. })
    }
}

/// Resolves comparison results into sync actions
pub struct SyncActionResolver;

impl SyncActionResolver {
    /// Determine the action for the file at `relative` from its freshness
    #[must_use]
    pub fn resolve(relative: &Path, freshness: Freshness) -> SyncAction {
        match freshness {
            Freshness::TargetMissing => SyncAction::Copy {
                source: relative.to_path_buf(),
                target: relative.to_path_buf(),
            },
            Freshness::SourceNewer => SyncAction::Update {
                source: relative.to_path_buf(),
                target: relative.to_path_buf(),
            },
            Freshness::UpToDate => SyncAction::Skip {
                path: relative.to_path_buf(),
            },
        }
    }
}
