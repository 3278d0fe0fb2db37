//! Filesystem primitives applied by the synchronizer

pub mod copy;

use crate::types::SyncError;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;

pub use copy::write_file_atomic;

/// Recursively remove a directory and everything below it
///
/// # Errors
/// * `SyncError::NotADirectory` if `path` is not a directory (nothing is removed)
/// * IO errors from the removal itself
pub fn remove_directory(path: &Path) -> Result<(), SyncError> {
    if !path.is_dir() {
        return Err(SyncError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    // A link to a directory is unlinked, never followed
    let is_link = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .map_err(|e| map_file_error(path, e))?;
    if is_link {
        return remove_link(path);
    }

    fs::remove_dir_all(path).map_err(|e| map_file_error(path, e))
}

/// Remove a single file
///
/// # Errors
/// * `SyncError::NotAFile` if `path` is a directory (nothing is removed)
/// * IO errors from the removal itself
pub fn remove_file(path: &Path) -> Result<(), SyncError> {
    if path.is_dir() {
        return Err(SyncError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    fs::remove_file(path).map_err(|e| map_file_error(path, e))
}

/// Create a directory together with any missing parents
pub fn create_directory(path: &Path) -> Result<(), SyncError> {
    fs::create_dir_all(path).map_err(|e| map_file_error(path, e))
}

#[cfg(unix)]
fn remove_link(path: &Path) -> Result<(), SyncError> {
    fs::remove_file(path).map_err(|e| map_file_error(path, e))
}

#[cfg(windows)]
fn remove_link(path: &Path) -> Result<(), SyncError> {
    // Directory links are removed as directories on Windows
    fs::remove_dir(path).map_err(|e| map_file_error(path, e))
}

pub(crate) fn map_file_error(path: &Path, error: Error) -> SyncError {
    if matches!(error.kind(), ErrorKind::PermissionDenied) {
        SyncError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else if matches!(error.kind(), ErrorKind::StorageFull)
        || matches!(error.raw_os_error(), Some(28 | 122))
    {
        SyncError::DiskFull {
            path: path.to_path_buf(),
        }
    } else {
        SyncError::Io(error)
    }
}
