use crate::{InputEvent, Mode};

use std::time::Duration;

/// Buffered status updates per subscriber before the oldest are dropped.
pub(crate) const STATUS_CHANNEL_CAPACITY: usize = 256;

/// Notification for presentation layers.
///
/// Observers only display these; nothing flows back into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    /// The engine entered a new mode.
    ModeChanged(Mode),
    /// An event was appended to the log being recorded.
    EventRecorded(InputEvent),
    /// Playback began a pass. `pass` counts from 1; `loop_count` of 0 means
    /// the playback repeats until stopped.
    PassStarted {
        /// Pass number, starting at 1.
        pass: u32,
        /// Configured number of passes.
        loop_count: u32,
    },
    /// Playback is waiting between passes.
    LoopDelay {
        /// Time left before the next pass.
        remaining: Duration,
    },
}
