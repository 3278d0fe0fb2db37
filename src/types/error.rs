//! Error types for treesync

use std::path::PathBuf;
use thiserror::Error;

/// Error types for sync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Source or target root does not exist (raised before any mutation)
    #[error("Path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Directory removal was asked to remove something that is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// File removal was asked to remove a directory
    #[error("Not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Permission denied for specific path
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// No space left while writing a path
    #[error("Disk full while writing: {path}")]
    DiskFull { path: PathBuf },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Change log (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SyncError {
    /// Check if the caller can fix the input and retry without cleanup.
    ///
    /// Both variants are raised before the target tree is touched.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SyncError::PathNotFound { .. } | SyncError::Config(_))
    }
}
