//! Tests for atomic file writes

use treesync::executor::write_file_atomic;
use treesync::types::SyncError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn create_test_file(path: &PathBuf, content: &[u8]) {
    let mut file = fs::File::create(path).expect("Failed to create test file");
    file.write_all(content)
        .expect("Failed to write test content");
    file.flush().expect("Failed to flush");
}

/// Write the source's current bytes to `dest`, carrying its metadata over
fn copy_from(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    let metadata = fs::metadata(src).expect("Failed to read source metadata");
    let content = fs::read(src).expect("Failed to read source content");
    write_file_atomic(&content, dest, &metadata)
}

fn set_file_mtime(path: &PathBuf, mtime: SystemTime) {
    let filetime_mtime = filetime::FileTime::from_system_time(mtime);
    filetime::set_file_mtime(path, filetime_mtime).expect("Failed to set mtime");
}

#[test]
fn test_copy_basic_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    let content = b"Hello, treesync! This is a test file.";
    create_test_file(&src_path, content);

    let dest_path = root.join("dest.txt");

    let bytes_copied =
        copy_from(&src_path, &dest_path).expect("write_file_atomic should succeed");

    assert_eq!(bytes_copied, content.len() as u64);
    assert_eq!(fs::read(&dest_path).expect("Failed to read dest file"), content);
}

#[test]
fn test_copy_replaces_existing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"new");
    let dest_path = root.join("dest.txt");
    create_test_file(&dest_path, b"old and longer content");

    copy_from(&src_path, &dest_path).expect("write_file_atomic should overwrite");

    assert_eq!(fs::read(&dest_path).expect("Failed to read dest file"), b"new");
}

#[test]
fn test_copy_creates_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"test content");

    let dest_path = root.join("a/b/c/dest.txt");

    copy_from(&src_path, &dest_path)
        .expect("write_file_atomic should create parent directories");

    assert!(dest_path.exists());
    assert_eq!(fs::read(&dest_path).expect("Failed to read dest file"), b"test content");
}

#[test]
fn test_copy_preserves_mtime() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"test content");

    let mtime = SystemTime::now() - Duration::from_secs(3600);
    set_file_mtime(&src_path, mtime);

    let dest_path = root.join("dest.txt");

    copy_from(&src_path, &dest_path).expect("write_file_atomic should succeed");

    let src_mtime = fs::metadata(&src_path)
        .and_then(|m| m.modified())
        .expect("Failed to get src mtime");
    let dest_mtime = fs::metadata(&dest_path)
        .and_then(|m| m.modified())
        .expect("Failed to get dest mtime");

    let diff = if src_mtime > dest_mtime {
        src_mtime.duration_since(dest_mtime).unwrap()
    } else {
        dest_mtime.duration_since(src_mtime).unwrap()
    };

    assert!(
        diff < Duration::from_secs(2),
        "mtime should be preserved (diff: {:?})",
        diff
    );
}

#[test]
fn test_copy_removes_part_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"test content");

    let dest_path = root.join("dest.txt");

    copy_from(&src_path, &dest_path).expect("write_file_atomic should succeed");

    let leftovers: Vec<_> = fs::read_dir(root)
        .expect("Failed to list temp dir")
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".treesync-part"))
        .collect();
    assert!(
        leftovers.is_empty(),
        "part file should be removed after successful copy"
    );
    assert!(dest_path.exists());
}

#[test]
fn test_copy_large_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("large.bin");
    let size = 1024 * 1024;
    let content: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
    create_test_file(&src_path, &content);

    let dest_path = root.join("large_copy.bin");

    let bytes_copied =
        copy_from(&src_path, &dest_path).expect("write_file_atomic should handle large files");

    assert_eq!(bytes_copied, size as u64);
    assert_eq!(fs::read(&dest_path).expect("Failed to read dest file"), content);
}

#[test]
#[cfg(unix)]
fn test_copy_preserves_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"test content");

    let mut perms = fs::metadata(&src_path)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o640);
    fs::set_permissions(&src_path, perms).expect("Failed to set permissions");

    let dest_path = root.join("dest.txt");

    copy_from(&src_path, &dest_path).expect("write_file_atomic should succeed");

    let dest_mode = fs::metadata(&dest_path)
        .expect("Failed to get dest metadata")
        .permissions()
        .mode();
    assert_eq!(dest_mode & 0o777, 0o640, "Permissions should be preserved");
}

#[test]
fn test_write_uses_given_bytes_not_current_source() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    create_test_file(&src_path, b"version read by the caller");
    let metadata = fs::metadata(&src_path).expect("Failed to get metadata");
    let content = fs::read(&src_path).expect("Failed to read source");

    // Source changes after the caller's read
    create_test_file(&src_path, b"later version");

    let dest_path = root.join("dest.txt");
    let bytes_written =
        write_file_atomic(&content, &dest_path, &metadata).expect("write_file_atomic should succeed");

    assert_eq!(bytes_written, content.len() as u64);
    assert_eq!(
        fs::read(&dest_path).expect("Failed to read dest file"),
        b"version read by the caller"
    );
}
