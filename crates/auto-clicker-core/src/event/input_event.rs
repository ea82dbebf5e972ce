use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Normalized name of a keyboard key, e.g. `"F1"`, `"KeyA"`, `"Escape"`.
///
/// Names are case-sensitive. Keys the platform layer cannot name are
/// represented as `"Unknown(<raw code>)"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(String);

impl KeyCode {
    /// Wrap a key name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this names an actual key. Blank names never match a keystroke.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl From<&str> for KeyCode {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mouse button of a recorded or synthesized click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseButton::Left => "Left",
            MouseButton::Right => "Right",
            MouseButton::Middle => "Middle",
        };
        f.write_str(name)
    }
}

/// A single captured input action.
///
/// `offset` is the time elapsed since the previous event of the same log,
/// so a log replays independently of when it was captured and scales
/// linearly with playback speed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse button clicked at screen coordinates.
    MouseClick {
        /// Button that was pressed.
        button: MouseButton,
        /// Horizontal screen coordinate.
        x: i32,
        /// Vertical screen coordinate.
        y: i32,
        /// Delay since the previous event.
        offset: Duration,
    },
    /// Key pressed down.
    KeyPress {
        /// Key that was pressed.
        key: KeyCode,
        /// Delay since the previous event.
        offset: Duration,
    },
    /// Key released.
    KeyRelease {
        /// Key that was released.
        key: KeyCode,
        /// Delay since the previous event.
        offset: Duration,
    },
}

impl InputEvent {
    /// Delay since the previous event.
    pub fn offset(&self) -> Duration {
        match self {
            InputEvent::MouseClick { offset, .. }
            | InputEvent::KeyPress { offset, .. }
            | InputEvent::KeyRelease { offset, .. } => *offset,
        }
    }

    /// Delay to wait before this event at the given speed multiplier.
    ///
    /// Non-positive multipliers fall back to real time.
    pub fn scaled_offset(&self, speed_multiplier: f64) -> Duration {
        if speed_multiplier > 0.0 {
            self.offset().div_f64(speed_multiplier)
        } else {
            self.offset()
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[+{:.3}s] ", self.offset().as_secs_f64())?;
        match self {
            InputEvent::MouseClick { button, x, y, .. } => {
                write!(f, "Mouse Click: {} at ({}, {})", button, x, y)
            }
            InputEvent::KeyPress { key, .. } => write!(f, "Key Press: {}", key),
            InputEvent::KeyRelease { key, .. } => write!(f, "Key Release: {}", key),
        }
    }
}
