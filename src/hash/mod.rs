//! Content hashing used to decide whether a target file is stale

use crate::executor::map_file_error;
use crate::types::SyncError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the Blake3 digest of a file's full content
///
/// The file is streamed in 64KB chunks, so memory use does not grow with file size.
///
/// # Example
/// ```no_run
/// use treesync::hash::compute_hash;
/// use std::path::Path;
///
/// let hash = compute_hash(Path::new("file.txt"))?;
/// # Ok::<(), treesync::types::SyncError>(())
/// ```
pub fn compute_hash(file_path: &Path) -> Result<[u8; 32], SyncError> {
    let mut file = File::open(file_path).map_err(|e| map_file_error(file_path, e))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| map_file_error(file_path, e))?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Lowercase hex rendering of a digest, for log output
pub fn hash_hex(hash: &[u8; 32]) -> String {
    blake3::Hash::from(*hash).to_hex().to_string()
}
