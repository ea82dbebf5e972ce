use crate::config::{default_play_key, default_record_key, default_spam_key, default_stop_key};

use serde::{Deserialize, Serialize};

/// Control hotkey bindings, by key name (e.g. `"F1"`, `"KeyR"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Toggles recording.
    #[serde(default = "default_record_key")]
    pub record: String,
    /// Toggles playback.
    #[serde(default = "default_play_key")]
    pub play: String,
    /// Stops whatever is running.
    #[serde(default = "default_stop_key")]
    pub stop: String,
    /// Toggles spam clicking.
    #[serde(default = "default_spam_key")]
    pub spam: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            record: default_record_key(),
            play: default_play_key(),
            stop: default_stop_key(),
            spam: default_spam_key(),
        }
    }
}
