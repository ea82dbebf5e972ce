//! On-disk layout of a recording file, format version 1.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "settings": { "hotkeys": { "record": "F1", ... }, "speed_multiplier": 1.0, ... },
//!   "event_count": 2,
//!   "events": [
//!     { "type": "mouse_click", "button": "left", "x": 100, "y": 200, "offset_us": 0 },
//!     { "type": "key_press", "key": "KeyA", "offset_us": 500000 }
//!   ]
//! }
//! ```

use crate::{EventLog, InputEvent, KeyCode, MouseButton, Settings};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Version written by this build and the only one it reads.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RecordingFile {
    pub(crate) format_version: u32,
    pub(crate) settings: Settings,
    pub(crate) event_count: usize,
    pub(crate) events: Vec<EventRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum EventRecord {
    MouseClick {
        button: MouseButton,
        x: i32,
        y: i32,
        offset_us: u64,
    },
    KeyPress {
        key: KeyCode,
        offset_us: u64,
    },
    KeyRelease {
        key: KeyCode,
        offset_us: u64,
    },
}

impl From<&InputEvent> for EventRecord {
    fn from(event: &InputEvent) -> Self {
        // Offsets beyond u64 microseconds (~584k years) saturate.
        let offset_us = u64::try_from(event.offset().as_micros()).unwrap_or(u64::MAX);
        match event {
            InputEvent::MouseClick { button, x, y, .. } => EventRecord::MouseClick {
                button: *button,
                x: *x,
                y: *y,
                offset_us,
            },
            InputEvent::KeyPress { key, .. } => EventRecord::KeyPress {
                key: key.clone(),
                offset_us,
            },
            InputEvent::KeyRelease { key, .. } => EventRecord::KeyRelease {
                key: key.clone(),
                offset_us,
            },
        }
    }
}

impl From<EventRecord> for InputEvent {
    fn from(record: EventRecord) -> Self {
        match record {
            EventRecord::MouseClick {
                button,
                x,
                y,
                offset_us,
            } => InputEvent::MouseClick {
                button,
                x,
                y,
                offset: Duration::from_micros(offset_us),
            },
            EventRecord::KeyPress { key, offset_us } => InputEvent::KeyPress {
                key,
                offset: Duration::from_micros(offset_us),
            },
            EventRecord::KeyRelease { key, offset_us } => InputEvent::KeyRelease {
                key,
                offset: Duration::from_micros(offset_us),
            },
        }
    }
}

impl From<&EventLog> for RecordingFile {
    fn from(log: &EventLog) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            settings: log.settings.clone(),
            event_count: log.events.len(),
            events: log.events.iter().map(EventRecord::from).collect(),
        }
    }
}
