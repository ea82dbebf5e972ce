use crate::Mode;

use error_location::ErrorLocation;
use thiserror::Error;

/// Engine errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The requested operation is not allowed in the current mode.
    #[error("Cannot {operation} while {mode} {location}")]
    InvalidState {
        /// Mode the engine was in when the request arrived.
        mode: Mode,
        /// The rejected operation.
        operation: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Invalid hotkey binding or out-of-range setting.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Description of the rejected configuration.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recording file is corrupt or has an incompatible version.
    #[error("Recording format error: {reason} {location}")]
    FormatError {
        /// Description of the structural problem.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Underlying storage failure.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The input-injection capability failed to simulate an action.
    #[error("Input injection failed: {reason} {location}")]
    InjectionFailed {
        /// Description of the injection failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for CoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        CoreError::IoError {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
