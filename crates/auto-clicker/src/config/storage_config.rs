use crate::config::default_recordings_dir;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where recordings live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory for relative `save`/`load` paths.
    #[serde(default = "default_recordings_dir")]
    pub recordings_dir: PathBuf,
    /// Recording loaded at startup, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoload: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            recordings_dir: default_recordings_dir(),
            autoload: None,
        }
    }
}
