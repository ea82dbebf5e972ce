#[allow(clippy::module_inception)]
mod config;
mod hotkey_config;
mod playback_config;
mod storage_config;

pub(crate) use {
    config::Config, hotkey_config::HotkeyConfig, playback_config::PlaybackConfig,
    storage_config::StorageConfig,
};

use std::path::PathBuf;

use directories::ProjectDirs;

pub(crate) const DEFAULT_SPEED_MULTIPLIER: f64 = 1.0;
pub(crate) const DEFAULT_LOOP_COUNT: u32 = 1;
pub(crate) const DEFAULT_LOOP_DELAY_MS: u64 = 0;

/// Extension given to recordings saved without one.
pub(crate) const RECORDING_EXTENSION: &str = "aclk";

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "auto-clicker", "Auto-Clicker")
}

pub(crate) fn default_record_key() -> String {
    "F1".to_string()
}

pub(crate) fn default_play_key() -> String {
    "F2".to_string()
}

pub(crate) fn default_stop_key() -> String {
    "Escape".to_string()
}

pub(crate) fn default_spam_key() -> String {
    "F3".to_string()
}

pub(crate) fn default_speed_multiplier() -> f64 {
    DEFAULT_SPEED_MULTIPLIER
}

pub(crate) fn default_loop_count() -> u32 {
    DEFAULT_LOOP_COUNT
}

pub(crate) fn default_loop_delay_ms() -> u64 {
    DEFAULT_LOOP_DELAY_MS
}

pub(crate) fn default_recordings_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("recordings"))
        .unwrap_or_else(|| PathBuf::from("recordings"))
}
