//! `treesync.toml` configuration file

use super::Config;
use crate::types::{SyncError, DEFAULT_IGNORED};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk configuration; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,

    /// Extra ignored basenames
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Keep the built-in ignore names (default true)
    pub default_ignore: Option<bool>,

    pub dry_run: Option<bool>,
    pub pretty: Option<bool>,
    pub output: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&text).map_err(|e| {
            SyncError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SyncError> {
        toml::from_str(text).map_err(|e| SyncError::Config(format!("Invalid config file: {}", e)))
    }

    /// Turn into a full configuration; source and target are required here
    pub fn into_config(self) -> Result<Config, SyncError> {
        let source = self
            .source
            .ok_or_else(|| SyncError::Config("Config file has no `source`".to_string()))?;
        let target = self
            .target
            .ok_or_else(|| SyncError::Config("Config file has no `target`".to_string()))?;

        let mut ignore: Vec<String> = Vec::new();
        if self.default_ignore.unwrap_or(true) {
            ignore.extend(DEFAULT_IGNORED.iter().map(|s| s.to_string()));
        }
        ignore.extend(self.ignore);

        Ok(Config {
            source,
            target,
            ignore,
            dry_run: self.dry_run.unwrap_or(false),
            pretty: self.pretty.unwrap_or(false),
            output: self.output,
        })
    }
}
