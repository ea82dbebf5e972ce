use crate::{
    CoreError, CoreResult, EventLog, Hotkeys, InputEvent, Mode, ModeRequest, RawInput,
    RawInputKind, Settings,
};

use std::{
    panic::Location,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Turns raw input notifications into an [`EventLog`].
///
/// Purely reactive: `capture` never blocks, and events are appended in the
/// order notifications are handed in.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    session: Option<RecordingSession>,
}

#[derive(Debug)]
struct RecordingSession {
    log: EventLog,
    last_at: Option<Instant>,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Number of events captured so far in the running session.
    pub(crate) fn event_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.log.len())
    }

    /// Begin a new session, discarding any earlier in-progress log.
    #[track_caller]
    #[instrument(skip(self, settings))]
    pub(crate) fn start(&mut self, settings: Settings) -> CoreResult<()> {
        if self.is_recording() {
            return Err(CoreError::InvalidState {
                mode: Mode::Recording,
                operation: ModeRequest::StartRecord.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.session = Some(RecordingSession {
            log: EventLog::new(settings),
            last_at: None,
        });

        info!("Capture started");

        Ok(())
    }

    /// Append the event described by `raw`, returning it.
    ///
    /// Returns `None` when not recording, for mouse-up notifications, and for
    /// keys bound in `hotkeys`. Offsets are kept to whole microseconds, the
    /// resolution of the recording file.
    pub(crate) fn capture(&mut self, raw: &RawInput, hotkeys: &Hotkeys) -> Option<InputEvent> {
        let session = self.session.as_mut()?;

        if let Some(key) = raw.key()
            && hotkeys.action_for(key).is_some()
        {
            debug!(key = %key, "Ignoring hotkey while recording");
            return None;
        }

        let offset = session
            .last_at
            .map(|prev| whole_micros(raw.at.saturating_duration_since(prev)))
            .unwrap_or_default();

        let event = match &raw.kind {
            RawInputKind::KeyDown(key) => InputEvent::KeyPress {
                key: key.clone(),
                offset,
            },
            RawInputKind::KeyUp(key) => InputEvent::KeyRelease {
                key: key.clone(),
                offset,
            },
            RawInputKind::MouseDown { button, x, y } => InputEvent::MouseClick {
                button: *button,
                x: *x,
                y: *y,
                offset,
            },
            RawInputKind::MouseUp { .. } => return None,
        };

        session.last_at = Some(raw.at);
        session.log.events.push(event.clone());

        Some(event)
    }

    /// Finish the session and hand back the completed log.
    #[track_caller]
    #[instrument(skip(self))]
    pub(crate) fn stop(&mut self) -> CoreResult<EventLog> {
        let session = self.session.take().ok_or_else(|| CoreError::InvalidState {
            mode: Mode::Idle,
            operation: ModeRequest::StopRecord.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(event_count = session.log.len(), "Capture stopped");

        Ok(session.log)
    }
}

fn whole_micros(gap: Duration) -> Duration {
    Duration::from_micros(u64::try_from(gap.as_micros()).unwrap_or(u64::MAX))
}
