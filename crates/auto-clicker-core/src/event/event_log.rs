use crate::{InputEvent, Settings};

use std::time::Duration;

/// Ordered recording of input events plus the settings it was captured with.
///
/// An empty log is valid and replays as a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    /// Events in capture order.
    pub events: Vec<InputEvent>,
    /// Settings stored with the recording.
    pub settings: Settings,
}

impl EventLog {
    /// Create an empty log carrying `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            events: Vec::new(),
            settings,
        }
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Unscaled duration of one pass, i.e. the sum of all offsets.
    pub fn duration(&self) -> Duration {
        self.events.iter().map(InputEvent::offset).sum()
    }
}
