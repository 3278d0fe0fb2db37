//! Atomic file copy implementation

use super::map_file_error;
use crate::types::SyncError;
use std::ffi::OsString;
use std::fs::{self, File, Metadata};
use std::io::Write;
use std::path::{Path, PathBuf};

const PART_SUFFIX: &str = ".treesync-part";

/// Write `content` to `dest` atomically using the write-then-rename strategy
///
/// 1. Write to a temporary `.treesync-part` sibling
/// 2. Flush and sync to disk
/// 3. Apply the source's permissions, atime and mtime from `src_metadata`
/// 4. Atomic rename to final destination
///
/// The caller passes bytes it has already read, so whatever it reports about
/// the write is exactly what landed on disk. An existing destination file is
/// replaced. On failure the partial file is removed and the destination is
/// left as it was.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes written
/// * `Err(SyncError)` - IO error or other failure
///
/// # Example
/// ```no_run
/// use treesync::executor::write_file_atomic;
/// use std::path::Path;
///
/// let source = Path::new("source.txt");
/// let metadata = std::fs::metadata(source)?;
/// let content = std::fs::read(source)?;
/// let bytes = write_file_atomic(&content, Path::new("dest.txt"), &metadata)?;
/// # Ok::<(), treesync::types::SyncError>(())
/// ```
pub fn write_file_atomic(
    content: &[u8],
    dest: &Path,
    src_metadata: &Metadata,
) -> Result<u64, SyncError> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| map_file_error(parent, e))?;
        }
    }

    let part_path = part_path_for(dest);

    match write_part(content, &part_path, src_metadata) {
        Ok(()) => {
            // This is atomic on POSIX systems (single syscall)
            fs::rename(&part_path, dest).map_err(|e| {
                let _ = fs::remove_file(&part_path);
                map_file_error(dest, e)
            })?;
            Ok(content.len() as u64)
        }
        Err(err) => {
            let _ = fs::remove_file(&part_path);
            Err(err)
        }
    }
}

fn write_part(content: &[u8], part_path: &Path, src_metadata: &Metadata) -> Result<(), SyncError> {
    let mut part_file = File::create(part_path).map_err(|e| map_file_error(part_path, e))?;

    part_file
        .write_all(content)
        .map_err(|e| map_file_error(part_path, e))?;
    part_file
        .sync_all()
        .map_err(|e| map_file_error(part_path, e))?;

    // Drop the file handle before rename (required on Windows)
    drop(part_file);

    let atime = filetime::FileTime::from_last_access_time(src_metadata);
    let mtime = filetime::FileTime::from_last_modification_time(src_metadata);
    filetime::set_file_times(part_path, atime, mtime).map_err(|e| map_file_error(part_path, e))?;

    fs::set_permissions(part_path, src_metadata.permissions())
        .map_err(|e| map_file_error(part_path, e))?;

    Ok(())
}

fn part_path_for(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("file"));
    name.push(PART_SUFFIX);
    dest.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_path_keeps_full_name() {
        assert_eq!(
            part_path_for(Path::new("to/a.txt")),
            PathBuf::from("to/a.txt.treesync-part")
        );
        assert_eq!(
            part_path_for(Path::new("to/archive.tar.gz")),
            PathBuf::from("to/archive.tar.gz.treesync-part")
        );
    }

    #[test]
    fn test_failed_write_leaves_no_part_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let src = temp_dir.path().join("src.txt");
        fs::write(&src, "content").unwrap();
        let metadata = fs::metadata(&src).unwrap();
        // A directory in the way makes the final rename fail
        let dest = temp_dir.path().join("taken");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("inside.txt"), "x").unwrap();

        let result = write_file_atomic(b"content", &dest, &metadata);

        assert!(result.is_err());
        assert!(dest.is_dir());
        assert!(!part_path_for(&dest).exists());
    }
}
