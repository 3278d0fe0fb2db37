//! IgnoreSet - basenames excluded from both sync passes

use std::collections::BTreeSet;
use std::path::Path;

/// OS-generated metadata files skipped by default
pub const DEFAULT_IGNORED: [&str; 2] = ["Thumbs.db", ".DS_Store"];

/// Set of entity basenames that are never walked, compared, deleted or added.
///
/// Matching is exact and applies to files and directories alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
}

impl IgnoreSet {
    /// Default set (`Thumbs.db`, `.DS_Store`)
    pub fn new() -> Self {
        Self::empty().with(DEFAULT_IGNORED)
    }

    /// Set that ignores nothing
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Add several names, builder style
    pub fn with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.insert(name);
        }
        self
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Exact basename lookup
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Check the final component of `path`.
    ///
    /// Paths without a final component (`/`, `..`) are never ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.contains(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new()
    }
}
