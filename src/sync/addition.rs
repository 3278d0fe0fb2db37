//! Addition/update pass: bring missing or stale source entries into the target

use super::{emit_change, ChangeCallback, Synchronizer};
use crate::executor::{create_directory, map_file_error, write_file_atomic};
use crate::hash::{compute_hash, hash_hex};
use crate::scanner::{classify, scan_tree};
use crate::types::{ChangeLog, ChangeRecord, EntryKind, SyncError};
use std::fs;
use tracing::{debug, info, trace};

pub(super) fn add_absent_entries(
    sync: &Synchronizer,
    on_change: Option<&ChangeCallback>,
) -> Result<ChangeLog, SyncError> {
    debug!(source_dir = %sync.source().display(), "starting addition pass");

    let entries = scan_tree(sync.source(), sync.ignore())?;
    let mut log = ChangeLog::new();

    for entry in entries {
        let source_path = entry.rebase(sync.source());
        let target_path = entry.rebase(sync.target());
        let existing = classify(&target_path)?;

        let record = match entry.kind {
            EntryKind::Directory => {
                if existing == Some(EntryKind::Directory) {
                    continue;
                }

                info!("Add dir {}", target_path.display());
                if !sync.is_dry_run() {
                    create_directory(&target_path)?;
                }
                ChangeRecord::AddDirectory { path: target_path }
            }
            EntryKind::File => {
                if existing == Some(EntryKind::File) {
                    let source_hash = compute_hash(&source_path)?;
                    if source_hash == compute_hash(&target_path)? {
                        trace!(
                            hash = %hash_hex(&source_hash),
                            "Unchanged file {}",
                            target_path.display()
                        );
                        continue;
                    }
                }

                info!(
                    "Add file {} from {}",
                    target_path.display(),
                    source_path.display()
                );
                // Read once: the record and the target get the same bytes
                let metadata =
                    fs::metadata(&source_path).map_err(|e| map_file_error(&source_path, e))?;
                let content = fs::read(&source_path).map_err(|e| map_file_error(&source_path, e))?;
                if !sync.is_dry_run() {
                    write_file_atomic(&content, &target_path, &metadata)?;
                }
                ChangeRecord::AddFile {
                    path: target_path,
                    content,
                }
            }
        };

        emit_change(on_change, &record);
        log.push(record);
    }

    debug!(changes = log.len(), "addition pass complete");
    Ok(log)
}
