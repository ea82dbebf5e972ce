use crate::{CoreError, write_atomic};

use std::fs;

use tempfile::TempDir;

/// WHAT: An existing file is replaced and no temp sibling remains
/// WHY: Saves must never leave a half-written or stray file behind
#[test]
#[allow(clippy::unwrap_used)]
fn given_existing_file_when_writing_atomically_then_replaced_without_temp() {
    // Given: A file with old contents
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, b"old").unwrap();

    // When: Writing new contents
    write_atomic(&path, b"new contents").unwrap();

    // Then: New contents in place, no temp file
    assert_eq!(fs::read(&path).unwrap(), b"new contents");
    assert!(!dir.path().join("settings.toml.tmp").exists());
}

/// WHAT: A missing parent directory is an IoError
/// WHY: Storage failures are reported, never retried or created implicitly
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_directory_when_writing_atomically_then_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("file.aclk");

    let result = write_atomic(&path, b"{}");

    assert!(matches!(result, Err(CoreError::IoError { .. })));
    assert!(!path.exists());
}

/// WHAT: A path without a file name is rejected
/// WHY: There is no sibling to write the temp file to
#[test]
fn given_root_path_when_writing_atomically_then_io_error() {
    let result = write_atomic(std::path::Path::new("/"), b"{}");

    assert!(matches!(result, Err(CoreError::IoError { .. })));
}
