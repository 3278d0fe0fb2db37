//! # treesync - one-way directory synchronization
//!
//! Makes a target directory tree mirror a source tree and reports every
//! applied mutation as a structured change record.
//!
//! ```no_run
//! use treesync::Synchronizer;
//!
//! let log = Synchronizer::new("tmp/from", "tmp/to").sync()?;
//! println!("{}", log.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod commands;
pub mod config;
pub mod executor;
pub mod hash;
pub mod scanner;
pub mod sync;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use sync::Synchronizer;
pub use types::{ChangeLog, ChangeRecord, IgnoreSet, Operation, SyncError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
