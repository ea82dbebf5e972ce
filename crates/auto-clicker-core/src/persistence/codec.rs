use crate::{
    CoreError, CoreResult, EventLog, InputEvent,
    persistence::{
        atomic_write::write_atomic,
        recording_file::{FORMAT_VERSION, RecordingFile},
    },
};

use std::{fs, panic::Location, path::Path};

use error_location::ErrorLocation;
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Write `log` to `path` as a version 1 recording file.
///
/// The document is written to a temporary sibling first and renamed into
/// place, so an existing file is never left half-written.
///
/// # Errors
///
/// Returns `ConfigError` if the log's settings are out of range and
/// `IoError` if the file cannot be written.
#[track_caller]
#[instrument(skip(log), fields(event_count = log.len()))]
pub fn save_recording(log: &EventLog, path: &Path) -> CoreResult<()> {
    log.settings.validate()?;

    let document = RecordingFile::from(log);
    let contents = serde_json::to_vec_pretty(&document).map_err(|e| CoreError::FormatError {
        reason: format!("Failed to serialize recording: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    write_atomic(path, &contents)?;

    info!(path = ?path, "Recording saved (atomic write)");

    Ok(())
}

/// Read a recording file written by [`save_recording`].
///
/// The format version is checked before anything else is interpreted.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be read and `FormatError` if it is
/// malformed, truncated, of another format version, or carries invalid
/// settings or events.
#[track_caller]
#[instrument]
pub fn load_recording(path: &Path) -> CoreResult<EventLog> {
    let bytes = fs::read(path)?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| CoreError::FormatError {
        reason: format!("Malformed recording: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    check_version(&value)?;

    let document: RecordingFile =
        serde_json::from_value(value).map_err(|e| CoreError::FormatError {
            reason: format!("Invalid recording contents: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if document.event_count != document.events.len() {
        return Err(CoreError::FormatError {
            reason: format!(
                "Header declares {} events but {} are present",
                document.event_count,
                document.events.len()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    document
        .settings
        .validate()
        .map_err(|e| CoreError::FormatError {
            reason: format!("Invalid settings: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let events: Vec<InputEvent> = document.events.into_iter().map(InputEvent::from).collect();

    if let Some(index) = events.iter().position(|event| match event {
        InputEvent::KeyPress { key, .. } | InputEvent::KeyRelease { key, .. } => !key.is_valid(),
        InputEvent::MouseClick { .. } => false,
    }) {
        return Err(CoreError::FormatError {
            reason: format!("Event {} has an empty key name", index),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    info!(event_count = events.len(), "Recording loaded");

    Ok(EventLog {
        events,
        settings: document.settings,
    })
}

#[track_caller]
fn check_version(value: &Value) -> CoreResult<()> {
    let version = value
        .get("format_version")
        .ok_or_else(|| CoreError::FormatError {
            reason: "Missing format_version".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    match version.as_u64() {
        Some(v) if v == u64::from(FORMAT_VERSION) => {
            debug!(format_version = v, "Format version accepted");
            Ok(())
        }
        _ => Err(CoreError::FormatError {
            reason: format!(
                "Unsupported format version {} (expected {})",
                version, FORMAT_VERSION
            ),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
