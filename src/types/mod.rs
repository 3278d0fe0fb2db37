//! Core type definitions for treesync

mod change;
mod entry;
mod error;
mod ignore;

pub use change::{ChangeLog, ChangeRecord, ChangeSummary, Operation};
pub use entry::{EntryKind, TreeEntry};
pub use error::SyncError;
pub use ignore::{IgnoreSet, DEFAULT_IGNORED};
