//! Main sync command

use crate::executor::map_file_error;
use crate::sync::Synchronizer;
use crate::types::{ChangeLog, SyncError};
use crate::Config;
use std::fs;
use std::io::Write;
use tracing::info;

/// Run the sync operation and emit the JSON change log
///
/// The log goes to `config.output` when set, stdout otherwise. It is only
/// emitted once the whole run succeeded.
pub fn run(config: &Config) -> Result<ChangeLog, SyncError> {
    config.validate()?;

    let log = Synchronizer::from_config(config).sync()?;
    let rendered = render(&log, config.pretty)?;

    match &config.output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n")).map_err(|e| map_file_error(path, e))?;
            info!("Wrote {} change record(s) to {}", log.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}")?;
            stdout.flush()?;
        }
    }

    if config.dry_run {
        info!("Dry-run mode: no changes were made.");
    }

    Ok(log)
}

/// Serialize a change log as compact or indented JSON
pub fn render(log: &ChangeLog, pretty: bool) -> Result<String, SyncError> {
    let json = if pretty {
        log.to_json_pretty()?
    } else {
        log.to_json()?
    };
    Ok(json)
}
