//! Sequential top-down directory walker

use crate::executor::map_file_error;
use crate::types::{EntryKind, IgnoreSet, SyncError, TreeEntry};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Walk `root_path` and return every entity below it in pre-order
///
/// A directory always precedes its descendants, and siblings are visited in
/// file-name order. Nothing is filtered except the ignore set: hidden files and
/// VCS ignore files are synced like anything else. An ignored directory is
/// pruned together with its whole subtree. The root itself is not returned.
///
/// Symbolic links are not followed. A link is classified by what it points
/// at, so a link to a directory is reported as a directory without being
/// descended into.
///
/// # Errors
/// Any traversal error (permission denied, entry vanished mid-walk) aborts the
/// scan and is returned as `SyncError::Io`.
pub fn scan_tree(root_path: &Path, ignore_set: &IgnoreSet) -> Result<Vec<TreeEntry>, SyncError> {
    let filter_set = ignore_set.clone();
    let walker = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| entry.depth() == 0 || !filter_set.is_ignored(entry.path()))
        .build();

    let mut entries = Vec::new();

    for result in walker {
        let entry = result.map_err(map_walk_error)?;

        if entry.depth() == 0 {
            continue;
        }

        // Only stdin entries lack a file type
        let Some(file_type) = entry.file_type() else {
            continue;
        };

        let kind = if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        let relative_path = entry
            .path()
            .strip_prefix(root_path)
            .map_err(|_| {
                SyncError::Io(std::io::Error::other(format!(
                    "{} is not located under {}",
                    entry.path().display(),
                    root_path.display()
                )))
            })?
            .to_path_buf();

        entries.push(TreeEntry::new(relative_path, kind));
    }

    tracing::trace!(root = %root_path.display(), entries = entries.len(), "scanned tree");

    Ok(entries)
}

/// Kind of whatever currently exists at `path`, following links
///
/// Returns `Ok(None)` when nothing is there, including when a parent
/// component is a file. Any other stat failure (permission denied, link
/// loop) is an error: an unreadable counterpart is not an absent one.
pub fn classify(path: &Path) -> Result<Option<EntryKind>, SyncError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(Some(EntryKind::Directory)),
        Ok(_) => Ok(Some(EntryKind::File)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
        Err(e) => Err(map_file_error(path, e)),
    }
}

fn map_walk_error(error: ignore::Error) -> SyncError {
    let message = error.to_string();
    match error.into_io_error() {
        Some(io_error) => SyncError::Io(io_error),
        None => SyncError::Io(std::io::Error::other(message)),
    }
}
