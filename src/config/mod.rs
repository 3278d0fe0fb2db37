//! Configuration management

mod args;
mod file;

pub use args::Cli;
pub use file::FileConfig;

use super::executor::map_file_error;
use super::types::{IgnoreSet, SyncError, DEFAULT_IGNORED};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration for treesync
#[derive(Debug, Clone)]
pub struct Config {
    /// Source directory (authoritative)
    pub source: PathBuf,

    /// Target directory (made to match the source)
    pub target: PathBuf,

    /// Basenames skipped in both passes
    pub ignore: Vec<String>,

    /// Dry run (report changes, don't apply them)
    pub dry_run: bool,

    /// Indent the JSON change log
    pub pretty: bool,

    /// Write the change log here instead of stdout
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            target: PathBuf::new(),
            ignore: DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect(),
            dry_run: false,
            pretty: false,
            output: None,
        }
    }
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        for path in [&self.source, &self.target] {
            if !path.exists() {
                return Err(SyncError::PathNotFound { path: path.clone() });
            }
        }

        let source = fs::canonicalize(&self.source).map_err(|e| map_file_error(&self.source, e))?;
        let target = fs::canonicalize(&self.target).map_err(|e| map_file_error(&self.target, e))?;

        if source == target {
            return Err(SyncError::Config(
                "Source and target cannot be the same".to_string(),
            ));
        }
        // Syncing into (or out of) your own subtree never converges
        if target.starts_with(&source) {
            return Err(SyncError::Config(format!(
                "Target {} is inside source {}",
                self.target.display(),
                self.source.display()
            )));
        }
        if source.starts_with(&target) {
            return Err(SyncError::Config(format!(
                "Source {} is inside target {}",
                self.source.display(),
                self.target.display()
            )));
        }

        Ok(())
    }

    /// Ignore set built from the configured names
    pub fn ignore_set(&self) -> IgnoreSet {
        IgnoreSet::empty().with(self.ignore.iter().cloned())
    }

    /// Load a configuration file (without CLI overrides)
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        FileConfig::load(path)?.into_config()
    }

    /// Parse configuration from TOML text (without CLI overrides)
    pub fn from_toml_str(text: &str) -> Result<Self, SyncError> {
        FileConfig::from_toml_str(text)?.into_config()
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    /// Merge the optional config file with command-line overrides
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let source = cli
            .source
            .or(file.source)
            .ok_or_else(|| SyncError::Config("No source directory given".to_string()))?;
        let target = cli
            .target
            .or(file.target)
            .ok_or_else(|| SyncError::Config("No target directory given".to_string()))?;

        let use_defaults = !cli.no_default_ignore && file.default_ignore.unwrap_or(true);
        let mut ignore: Vec<String> = Vec::new();
        if use_defaults {
            ignore.extend(DEFAULT_IGNORED.iter().map(|s| s.to_string()));
        }
        ignore.extend(file.ignore);
        ignore.extend(cli.ignore);

        Ok(Self {
            source,
            target,
            ignore,
            dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
            pretty: cli.pretty || file.pretty.unwrap_or(false),
            output: cli.output.or(file.output),
        })
    }
}
