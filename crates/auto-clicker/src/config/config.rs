//! Configuration management for auto-clicker.
//!
//! Handles loading and saving the TOML configuration file from the platform
//! config directory, and converting it to and from engine [`Settings`].

use crate::{
    AppError, AppResult,
    config::{HotkeyConfig, PlaybackConfig, RECORDING_EXTENSION, StorageConfig, project_dirs},
};

use auto_clicker_core::{Hotkeys, KeyCode, Settings, write_atomic};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Control hotkeys.
    #[serde(default)]
    pub hotkeys: HotkeyConfig,
    /// Playback defaults.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Recording storage.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config found, creating default");
            Self::create_default(&config_path)
        }
    }

    /// Load and validate configuration from `path`.
    ///
    /// Missing fields take their defaults.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.to_settings()?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration to the platform config directory.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Write the configuration to `path`, replacing any previous file in one
    /// step.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Cannot encode config as TOML: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        write_atomic(path, contents.as_bytes()).map_err(|e| AppError::ConfigError {
            reason: format!("Cannot write {}: {}", path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration saved");

        Ok(())
    }

    /// Engine settings described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for out-of-range values, blank keys or a key
    /// bound to two actions.
    #[track_caller]
    pub fn to_settings(&self) -> AppResult<Settings> {
        let settings = Settings {
            hotkeys: Hotkeys {
                record: KeyCode::new(self.hotkeys.record.clone()),
                play: KeyCode::new(self.hotkeys.play.clone()),
                stop: KeyCode::new(self.hotkeys.stop.clone()),
                spam: KeyCode::new(self.hotkeys.spam.clone()),
            },
            speed_multiplier: self.playback.speed_multiplier,
            loop_count: self.playback.loop_count,
            loop_delay_ms: self.playback.loop_delay_ms,
        };

        settings.validate().map_err(|e| AppError::ConfigError {
            reason: format!("Invalid settings: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(settings)
    }

    /// Copy engine settings back into the file representation.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.hotkeys = HotkeyConfig {
            record: settings.hotkeys.record.to_string(),
            play: settings.hotkeys.play.to_string(),
            stop: settings.hotkeys.stop.to_string(),
            spam: settings.hotkeys.spam.to_string(),
        };
        self.playback = PlaybackConfig {
            speed_multiplier: settings.speed_multiplier,
            loop_count: settings.loop_count,
            loop_delay_ms: settings.loop_delay_ms,
        };
    }

    /// Resolve a user-supplied recording path.
    ///
    /// Relative paths are taken from the recordings directory and a path
    /// without an extension gets `.aclk`.
    pub fn resolve_recording_path(&self, path: &Path) -> PathBuf {
        let mut resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.storage.recordings_dir.join(path)
        };

        if resolved.extension().is_none() {
            resolved.set_extension(RECORDING_EXTENSION);
        }

        resolved
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = project_dirs().ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get config directory".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default(config_path: &Path) -> AppResult<Self> {
        let config = Config::default();

        config.save_to(config_path)?;

        info!(
            config_path = ?config_path,
            recordings_dir = ?config.storage.recordings_dir,
            "Default config created"
        );

        Ok(config)
    }
}
