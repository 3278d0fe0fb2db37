//! One-way tree synchronization
//!
//! A run makes the target tree match the source tree in two strictly
//! sequential passes:
//!
//! 1. **Removal** walks the target and deletes every directory or file whose
//!    source counterpart is missing. A directory is deleted as a whole and its
//!    former contents are not visited.
//! 2. **Addition** walks the source, creates missing directories and copies
//!    every file that is missing from the target or whose content digest
//!    differs.
//!
//! A counterpart only counts when it is of the same kind, so a target file
//! sitting where the source has a directory is replaced (and vice versa).
//! Each applied mutation yields one [`ChangeRecord`]; the records form the
//! returned [`ChangeLog`] in application order.

mod addition;
mod removal;

use crate::config::Config;
use crate::types::{ChangeLog, ChangeRecord, IgnoreSet, SyncError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Callback invoked with each record right after its mutation was applied.
pub type ChangeCallback = dyn Fn(&ChangeRecord) + Send + Sync;

/// Reconciles a target directory tree against a source tree
#[derive(Debug, Clone)]
pub struct Synchronizer {
    source: PathBuf,
    target: PathBuf,
    ignore: IgnoreSet,
    dry_run: bool,
}

impl Synchronizer {
    /// Store both roots verbatim. No I/O happens until [`Synchronizer::sync`].
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ignore: IgnoreSet::default(),
            dry_run: false,
        }
    }

    /// Build a synchronizer from validated configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.source.clone(), config.target.clone())
            .with_ignore(config.ignore_set())
            .dry_run(config.dry_run)
    }

    /// Replace the ignore set
    pub fn with_ignore(mut self, ignore: IgnoreSet) -> Self {
        self.ignore = ignore;
        self
    }

    /// Compute the change log without touching the target
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Run both passes and return every applied change
    ///
    /// # Errors
    /// * `SyncError::PathNotFound` if either root is missing; nothing has been
    ///   mutated in that case
    /// * Any I/O error met mid-walk aborts the run. Mutations applied before the
    ///   failure stay applied and are only visible through
    ///   [`Synchronizer::sync_with`].
    pub fn sync(&self) -> Result<ChangeLog, SyncError> {
        self.sync_with(None)
    }

    /// Same as [`Synchronizer::sync`], streaming each record to `on_change`
    pub fn sync_with(&self, on_change: Option<&ChangeCallback>) -> Result<ChangeLog, SyncError> {
        self.check_paths()?;

        let mut log = removal::remove_absent_entries(self, on_change)?;
        log.extend(addition::add_absent_entries(self, on_change)?);

        info!(
            source = %self.source.display(),
            target = %self.target.display(),
            dry_run = self.dry_run,
            "{}",
            log.summary()
        );

        Ok(log)
    }

    fn check_paths(&self) -> Result<(), SyncError> {
        for path in [&self.source, &self.target] {
            if !path.exists() {
                return Err(SyncError::PathNotFound { path: path.clone() });
            }
        }
        Ok(())
    }
}

fn emit_change(on_change: Option<&ChangeCallback>, record: &ChangeRecord) {
    if let Some(callback) = on_change {
        callback(record);
    }
}
