use crate::{CoreError, CoreResult};

use std::{
    ffi::OsString,
    fs,
    io::{self, Write},
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::debug;

/// Replace `path` with `contents` in one step.
///
/// The bytes go to a `<name>.tmp` sibling, are synced, and the sibling is
/// renamed over `path`. Readers see either the old file or the new one. The
/// sibling is removed again if the rename fails.
///
/// # Errors
///
/// Returns `IoError` if `path` has no file name or any step fails.
#[track_caller]
pub fn write_atomic(path: &Path, contents: &[u8]) -> CoreResult<()> {
    let temp_path = temp_path_for(path)?;

    let mut temp_file = fs::File::create(&temp_path)?;
    if let Err(e) = temp_file
        .write_all(contents)
        .and_then(|()| temp_file.sync_all())
    {
        drop(temp_file);
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    drop(temp_file);

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    debug!(path = ?path, bytes = contents.len(), "Atomic write finished");

    Ok(())
}

#[track_caller]
fn temp_path_for(path: &Path) -> CoreResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| CoreError::IoError {
        source: io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Not a file path: {}", path.display()),
        ),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let mut temp_name = OsString::from(file_name);
    temp_name.push(".tmp");

    Ok(path.with_file_name(temp_name))
}
