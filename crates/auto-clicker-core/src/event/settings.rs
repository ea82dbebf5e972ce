use crate::{CoreError, CoreResult, KeyCode};

use std::{fmt, panic::Location, str::FromStr};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Slowest allowed playback speed multiplier.
pub const MIN_SPEED_MULTIPLIER: f64 = 0.1;
/// Fastest allowed playback speed multiplier.
pub const MAX_SPEED_MULTIPLIER: f64 = 10.0;
/// Highest finite loop count. `0` means loop forever.
pub const MAX_LOOP_COUNT: u32 = 100;
/// Longest allowed pause between loops.
pub const MAX_LOOP_DELAY_MS: u64 = 60_000;

/// Control actions that can be bound to a hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    /// Toggle recording.
    Record,
    /// Toggle playback.
    Play,
    /// Force-stop whatever is running.
    Stop,
    /// Toggle spam clicking.
    Spam,
}

impl HotkeyAction {
    /// Every bindable action.
    pub const ALL: [HotkeyAction; 4] = [
        HotkeyAction::Record,
        HotkeyAction::Play,
        HotkeyAction::Stop,
        HotkeyAction::Spam,
    ];
}

impl fmt::Display for HotkeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HotkeyAction::Record => "record",
            HotkeyAction::Play => "play",
            HotkeyAction::Stop => "stop",
            HotkeyAction::Spam => "spam",
        };
        f.write_str(name)
    }
}

impl FromStr for HotkeyAction {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "record" => Ok(HotkeyAction::Record),
            "play" => Ok(HotkeyAction::Play),
            "stop" => Ok(HotkeyAction::Stop),
            "spam" => Ok(HotkeyAction::Spam),
            other => Err(CoreError::ConfigError {
                reason: format!("Unknown hotkey action: {:?}", other),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Key bound to each control action. No two actions share a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkeys {
    /// Toggles recording.
    pub record: KeyCode,
    /// Toggles playback.
    pub play: KeyCode,
    /// Force-stop.
    pub stop: KeyCode,
    /// Toggles spam clicking.
    pub spam: KeyCode,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            record: KeyCode::from("F1"),
            play: KeyCode::from("F2"),
            stop: KeyCode::from("Escape"),
            spam: KeyCode::from("F3"),
        }
    }
}

impl Hotkeys {
    /// Key currently bound to `action`.
    pub fn key_for(&self, action: HotkeyAction) -> &KeyCode {
        match action {
            HotkeyAction::Record => &self.record,
            HotkeyAction::Play => &self.play,
            HotkeyAction::Stop => &self.stop,
            HotkeyAction::Spam => &self.spam,
        }
    }

    /// Action bound to `key`, if any.
    pub fn action_for(&self, key: &KeyCode) -> Option<HotkeyAction> {
        HotkeyAction::ALL
            .into_iter()
            .find(|action| self.key_for(*action) == key)
    }

    /// Bind `action` to `key`.
    ///
    /// Fails without changing anything if `key` already triggers another
    /// action or is blank.
    #[track_caller]
    pub fn rebind(&mut self, action: HotkeyAction, key: KeyCode) -> CoreResult<()> {
        if !key.is_valid() {
            return Err(CoreError::ConfigError {
                reason: format!("Hotkey for {} cannot be blank", action),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(owner) = self.action_for(&key)
            && owner != action
        {
            return Err(CoreError::ConfigError {
                reason: format!("Key {} is already bound to {}", key, owner),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match action {
            HotkeyAction::Record => self.record = key,
            HotkeyAction::Play => self.play = key,
            HotkeyAction::Stop => self.stop = key,
            HotkeyAction::Spam => self.spam = key,
        }

        Ok(())
    }

    /// Check that every key is non-blank and bound to exactly one action.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        for (i, action) in HotkeyAction::ALL.iter().enumerate() {
            let key = self.key_for(*action);
            if !key.is_valid() {
                return Err(CoreError::ConfigError {
                    reason: format!("Hotkey for {} cannot be blank", action),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            for other in &HotkeyAction::ALL[i + 1..] {
                if self.key_for(*other) == key {
                    return Err(CoreError::ConfigError {
                        reason: format!("Key {} is bound to both {} and {}", key, action, other),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Session settings stored alongside every recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Control hotkeys.
    pub hotkeys: Hotkeys,
    /// Playback speed, `2.0` halves every delay.
    pub speed_multiplier: f64,
    /// Number of passes, `0` loops until stopped.
    pub loop_count: u32,
    /// Pause between passes in milliseconds.
    pub loop_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkeys: Hotkeys::default(),
            speed_multiplier: 1.0,
            loop_count: 1,
            loop_delay_ms: 0,
        }
    }
}

impl Settings {
    /// Check every field against its allowed range.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if !(MIN_SPEED_MULTIPLIER..=MAX_SPEED_MULTIPLIER).contains(&self.speed_multiplier) {
            return Err(CoreError::ConfigError {
                reason: format!(
                    "Speed multiplier {} outside [{}, {}]",
                    self.speed_multiplier, MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.loop_count > MAX_LOOP_COUNT {
            return Err(CoreError::ConfigError {
                reason: format!(
                    "Loop count {} outside [0, {}]",
                    self.loop_count, MAX_LOOP_COUNT
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.loop_delay_ms > MAX_LOOP_DELAY_MS {
            return Err(CoreError::ConfigError {
                reason: format!(
                    "Loop delay {}ms outside [0, {}]",
                    self.loop_delay_ms, MAX_LOOP_DELAY_MS
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.hotkeys.validate()
    }

    /// Whether playback repeats until stopped.
    pub fn is_infinite(&self) -> bool {
        self.loop_count == 0
    }
}
