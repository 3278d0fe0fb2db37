//! Removal pass: drop target entries that have no source counterpart

use super::{emit_change, ChangeCallback, Synchronizer};
use crate::executor::{remove_directory, remove_file};
use crate::scanner::{classify, scan_tree};
use crate::types::{ChangeLog, ChangeRecord, EntryKind, SyncError};
use std::path::PathBuf;
use tracing::{debug, info};

pub(super) fn remove_absent_entries(
    sync: &Synchronizer,
    on_change: Option<&ChangeCallback>,
) -> Result<ChangeLog, SyncError> {
    debug!(target_dir = %sync.target().display(), "starting removal pass");

    let entries = scan_tree(sync.target(), sync.ignore())?;
    let mut log = ChangeLog::new();

    // Pre-order walk: a removed directory's descendants follow it directly
    let mut removed_dir: Option<PathBuf> = None;

    for entry in entries {
        if let Some(dir) = &removed_dir {
            if entry.is_inside(dir) {
                continue;
            }
        }

        if classify(&entry.rebase(sync.source()))? == Some(entry.kind) {
            continue;
        }

        let target_path = entry.rebase(sync.target());
        let record = match entry.kind {
            EntryKind::Directory => {
                info!("Remove dir {}", target_path.display());
                if !sync.is_dry_run() {
                    remove_directory(&target_path)?;
                }
                removed_dir = Some(entry.relative_path);
                ChangeRecord::DeleteDirectory { path: target_path }
            }
            EntryKind::File => {
                info!("Remove file {}", target_path.display());
                if !sync.is_dry_run() {
                    remove_file(&target_path)?;
                }
                ChangeRecord::DeleteFile { path: target_path }
            }
        };

        emit_change(on_change, &record);
        log.push(record);
    }

    debug!(changes = log.len(), "removal pass complete");
    Ok(log)
}
