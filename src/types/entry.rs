//! TreeEntry - one walked entity of a sync tree

use std::path::{Path, PathBuf};

/// Whether a path is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }
}

/// Entity found under a sync root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the walked root
    pub relative_path: PathBuf,

    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn new(relative_path: PathBuf, kind: EntryKind) -> Self {
        Self {
            relative_path,
            kind,
        }
    }

    /// Re-root the relative path under `root`
    pub fn rebase(&self, root: &Path) -> PathBuf {
        root.join(&self.relative_path)
    }

    /// Check whether this entry lives strictly inside `dir` (both relative)
    pub fn is_inside(&self, dir: &Path) -> bool {
        self.relative_path != dir && self.relative_path.starts_with(dir)
    }
}
