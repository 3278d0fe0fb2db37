//! ChangeRecord and ChangeLog - what a sync run actually did

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of mutation applied to the target tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "delete_directory")]
    DeleteDirectory,
    #[serde(rename = "delete_file")]
    DeleteFile,
    #[serde(rename = "add_dir")]
    AddDirectory,
    #[serde(rename = "add_file")]
    AddFile,
}

impl Operation {
    /// Wire name used in the JSON change log
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::DeleteDirectory => "delete_directory",
            Operation::DeleteFile => "delete_file",
            Operation::AddDirectory => "add_dir",
            Operation::AddFile => "add_file",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applied mutation.
///
/// Only `AddFile` carries content, so a record without content for an added
/// file (or with content for anything else) cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireRecord", into = "WireRecord")]
pub enum ChangeRecord {
    /// Target directory removed together with all of its descendants
    DeleteDirectory { path: PathBuf },

    /// Target file removed
    DeleteFile { path: PathBuf },

    /// Target directory created (parents included)
    AddDirectory { path: PathBuf },

    /// Target file written from the source; `content` holds the source bytes
    AddFile { path: PathBuf, content: Vec<u8> },
}

impl ChangeRecord {
    pub fn operation(&self) -> Operation {
        match self {
            ChangeRecord::DeleteDirectory { .. } => Operation::DeleteDirectory,
            ChangeRecord::DeleteFile { .. } => Operation::DeleteFile,
            ChangeRecord::AddDirectory { .. } => Operation::AddDirectory,
            ChangeRecord::AddFile { .. } => Operation::AddFile,
        }
    }

    /// Path the operation targeted
    pub fn path(&self) -> &Path {
        match self {
            ChangeRecord::DeleteDirectory { path }
            | ChangeRecord::DeleteFile { path }
            | ChangeRecord::AddDirectory { path }
            | ChangeRecord::AddFile { path, .. } => path,
        }
    }

    /// Raw source bytes, present only for `AddFile`
    pub fn content(&self) -> Option<&[u8]> {
        match self {
            ChangeRecord::AddFile { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Base64 (standard alphabet, padded) rendering of the content
    pub fn b64_content(&self) -> Option<String> {
        self.content().map(|bytes| STANDARD.encode(bytes))
    }
}

/// Flat wire shape: `{ "operation", "path", "b64content" }`
///
/// JSON strings must be UTF-8, so a path that is not valid Unicode is written
/// with U+FFFD in place of the bad bytes. The file itself is still synced.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireRecord {
    operation: Operation,
    path: String,
    #[serde(default)]
    b64content: Option<String>,
}

impl From<ChangeRecord> for WireRecord {
    fn from(record: ChangeRecord) -> Self {
        let operation = record.operation();
        let b64content = record.b64_content();
        let path = match record {
            ChangeRecord::DeleteDirectory { path }
            | ChangeRecord::DeleteFile { path }
            | ChangeRecord::AddDirectory { path }
            | ChangeRecord::AddFile { path, .. } => path,
        };
        WireRecord {
            operation,
            path: path.to_string_lossy().into_owned(),
            b64content,
        }
    }
}

impl TryFrom<WireRecord> for ChangeRecord {
    type Error = String;

    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        let WireRecord {
            operation,
            path,
            b64content,
        } = wire;
        let path = PathBuf::from(path);

        match (operation, b64content) {
            (Operation::AddFile, Some(encoded)) => {
                let content = STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| format!("invalid b64content for {}: {}", path.display(), e))?;
                Ok(ChangeRecord::AddFile { path, content })
            }
            (Operation::AddFile, None) => Err(format!(
                "add_file record for {} has no b64content",
                path.display()
            )),
            (op, Some(_)) => Err(format!(
                "{} record for {} must not carry b64content",
                op,
                path.display()
            )),
            (Operation::DeleteDirectory, None) => Ok(ChangeRecord::DeleteDirectory { path }),
            (Operation::DeleteFile, None) => Ok(ChangeRecord::DeleteFile { path }),
            (Operation::AddDirectory, None) => Ok(ChangeRecord::AddDirectory { path }),
        }
    }
}

/// Per-operation counts of a change log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub deleted_dirs: usize,
    pub deleted_files: usize,
    pub added_dirs: usize,
    pub added_files: usize,
    /// Bytes written to the target by `AddFile` records
    pub bytes_written: u64,
}

impl ChangeSummary {
    pub fn total(&self) -> usize {
        self.deleted_dirs + self.deleted_files + self.added_dirs + self.added_files
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} change(s): -{} dir(s), -{} file(s), +{} dir(s), +{} file(s), {} byte(s) written",
            self.total(),
            self.deleted_dirs,
            self.deleted_files,
            self.added_dirs,
            self.added_files,
            self.bytes_written
        )
    }
}

/// Ordered log of applied changes.
///
/// Insertion order is application order: removal-pass records first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
    records: Vec<ChangeRecord>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ChangeRecord) {
        self.records.push(record);
    }

    /// Append every record of `other`, keeping its order
    pub fn extend(&mut self, other: ChangeLog) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// Aggregate counts per operation
    pub fn summary(&self) -> ChangeSummary {
        let mut summary = ChangeSummary::default();
        for record in &self.records {
            match record {
                ChangeRecord::DeleteDirectory { .. } => summary.deleted_dirs += 1,
                ChangeRecord::DeleteFile { .. } => summary.deleted_files += 1,
                ChangeRecord::AddDirectory { .. } => summary.added_dirs += 1,
                ChangeRecord::AddFile { content, .. } => {
                    summary.added_files += 1;
                    summary.bytes_written += content.len() as u64;
                }
            }
        }
        summary
    }

    /// Compact JSON array in chronological order
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented JSON array in chronological order
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Vec<ChangeRecord>> for ChangeLog {
    fn from(records: Vec<ChangeRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for ChangeLog {
    type Item = ChangeRecord;
    type IntoIter = std::vec::IntoIter<ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
