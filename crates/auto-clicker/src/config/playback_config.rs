use crate::config::{default_loop_count, default_loop_delay_ms, default_speed_multiplier};

use serde::{Deserialize, Serialize};

/// Playback defaults applied at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Speed multiplier, 0.1 to 10.0.
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: f64,
    /// Number of passes, 0 for infinite.
    #[serde(default = "default_loop_count")]
    pub loop_count: u32,
    /// Pause between passes in milliseconds.
    #[serde(default = "default_loop_delay_ms")]
    pub loop_delay_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: default_speed_multiplier(),
            loop_count: default_loop_count(),
            loop_delay_ms: default_loop_delay_ms(),
        }
    }
}
