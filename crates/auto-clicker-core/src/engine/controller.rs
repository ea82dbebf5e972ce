//! The engine: single owner of mode, current log and settings.
//!
//! Every transition is applied under one async mutex, so concurrent requests
//! (a hotkey racing a console command) resolve deterministically: the first
//! to take the lock wins and the other is judged against the new mode.

use crate::{
    CoreError, CoreResult, EventLog, HotkeyAction, InputEvent, InputInjector, KeyCode, Mode,
    ModeRequest, RawInput, Settings, StatusUpdate,
    engine::{
        activity::{self, Activity, ActivityOutcome},
        player::Player,
        recorder::Recorder,
        spam_clicker::SpamClicker,
        status::STATUS_CHANNEL_CAPACITY,
    },
    persistence,
};

use std::{io, panic::Location, path::Path, sync::Arc};

use error_location::ErrorLocation;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Recording/playback engine handle. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    state: Mutex<EngineState>,
    injector: Arc<dyn InputInjector>,
    status_tx: broadcast::Sender<StatusUpdate>,
}

struct EngineState {
    mode: Mode,
    log: EventLog,
    settings: Settings,
    recorder: Recorder,
    recording_session: Option<Uuid>,
    activity: Option<Activity>,
}

impl EngineState {
    #[track_caller]
    fn require_idle(&self, operation: &str) -> CoreResult<()> {
        if self.mode.is_active() {
            return Err(CoreError::InvalidState {
                mode: self.mode,
                operation: operation.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

impl Engine {
    /// Create an idle engine with an empty log.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `settings` are out of range.
    #[track_caller]
    #[instrument(skip(injector))]
    pub fn new(injector: Arc<dyn InputInjector>, settings: Settings) -> CoreResult<Self> {
        settings.validate()?;

        let (status_tx, _) = broadcast::channel(STATUS_CHANNEL_CAPACITY);

        info!("Engine initialized");

        Ok(Self {
            inner: Arc::new(EngineInner {
                state: Mutex::new(EngineState {
                    mode: Mode::Idle,
                    log: EventLog::new(settings.clone()),
                    settings,
                    recorder: Recorder::new(),
                    recording_session: None,
                    activity: None,
                }),
                injector,
                status_tx,
            }),
        })
    }

    /// Subscribe to status updates.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusUpdate> {
        self.inner.status_tx.subscribe()
    }

    /// Current mode.
    pub async fn mode(&self) -> Mode {
        self.inner.state.lock().await.mode
    }

    /// Current settings, including hotkeys.
    pub async fn settings(&self) -> Settings {
        self.inner.state.lock().await.settings.clone()
    }

    /// Snapshot of the current log.
    pub async fn log(&self) -> EventLog {
        self.inner.state.lock().await.log.clone()
    }

    /// Number of events captured so far while recording, otherwise the
    /// length of the current log.
    pub async fn event_count(&self) -> usize {
        let state = self.inner.state.lock().await;
        if state.recorder.is_recording() {
            state.recorder.event_count()
        } else {
            state.log.len()
        }
    }

    /// Apply a mode request from an explicit caller.
    ///
    /// Returns the mode reached. Starting playback of an empty log succeeds
    /// without leaving `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the request is not allowed in the current
    /// mode; nothing changes in that case.
    #[instrument(skip(self))]
    pub async fn request(&self, request: ModeRequest) -> CoreResult<Mode> {
        let (result, stopped) = {
            let mut state = self.inner.state.lock().await;
            self.apply_locked(&mut state, request)
        };

        if let Some(activity) = stopped {
            activity.join().await;
        }

        result
    }

    /// Apply the request a hotkey for `action` stands for in the current mode.
    ///
    /// The toggle decision and the transition happen under the same lock.
    #[instrument(skip(self))]
    pub async fn toggle(&self, action: HotkeyAction) -> CoreResult<Mode> {
        let (result, stopped) = {
            let mut state = self.inner.state.lock().await;
            let request = state.mode.toggle_request(action);
            self.apply_locked(&mut state, request)
        };

        if let Some(activity) = stopped {
            activity.join().await;
        }

        result
    }

    /// Trigger the action bound to `key`, if any.
    ///
    /// Returns `None` when `key` is not a hotkey, so the caller can treat it
    /// as ordinary input.
    #[instrument(skip(self))]
    pub async fn trigger_hotkey(&self, key: &KeyCode) -> Option<CoreResult<Mode>> {
        let (result, stopped) = {
            let mut state = self.inner.state.lock().await;
            let action = state.settings.hotkeys.action_for(key)?;
            let request = state.mode.toggle_request(action);
            debug!(key = %key, action = %action, request = %request, "Hotkey pressed");
            self.apply_locked(&mut state, request)
        };

        if let Some(activity) = stopped {
            activity.join().await;
        }

        Some(result)
    }

    /// Begin recording.
    pub async fn start_recording(&self) -> CoreResult<()> {
        self.request(ModeRequest::StartRecord).await.map(|_| ())
    }

    /// Stop recording and return the captured log, which becomes current.
    pub async fn stop_recording(&self) -> CoreResult<EventLog> {
        self.request(ModeRequest::StopRecord).await?;
        Ok(self.log().await)
    }

    /// Begin replaying the current log with the current settings.
    pub async fn start_playback(&self) -> CoreResult<Mode> {
        self.request(ModeRequest::StartPlay).await
    }

    /// Cancel playback.
    pub async fn stop_playback(&self) -> CoreResult<()> {
        self.request(ModeRequest::StopPlay).await.map(|_| ())
    }

    /// Begin spam clicking.
    pub async fn start_spam(&self) -> CoreResult<()> {
        self.request(ModeRequest::StartSpam).await.map(|_| ())
    }

    /// Stop spam clicking.
    pub async fn stop_spam(&self) -> CoreResult<()> {
        self.request(ModeRequest::StopSpam).await.map(|_| ())
    }

    /// Stop whatever is running and return to `Idle`.
    pub async fn force_stop(&self) -> CoreResult<()> {
        self.request(ModeRequest::ForceStop).await.map(|_| ())
    }

    /// Feed one raw input notification to the recorder.
    ///
    /// Ignored unless recording.
    pub async fn record_input(&self, raw: RawInput) {
        let mut guard = self.inner.state.lock().await;
        let state = &mut *guard;
        if state.mode != Mode::Recording {
            return;
        }

        // Filter by the live bindings, the ones the dispatcher matches.
        if let Some(event) = state.recorder.capture(&raw, &state.settings.hotkeys) {
            debug!(event = %event, "Event recorded");
            let _ = self.inner.status_tx.send(StatusUpdate::EventRecorded(event));
        }
    }

    /// Bind a hotkey action to a new key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `key` already triggers another action; the
    /// previous bindings stay in effect.
    #[instrument(skip(self))]
    pub async fn rebind_hotkey(&self, action: HotkeyAction, key: KeyCode) -> CoreResult<()> {
        let mut state = self.inner.state.lock().await;
        let mut hotkeys = state.settings.hotkeys.clone();
        hotkeys.rebind(action, key.clone())?;
        state.settings.hotkeys = hotkeys;

        info!(action = %action, key = %key, "Hotkey rebound");

        Ok(())
    }

    /// Replace the current settings.
    ///
    /// A running playback keeps the settings it started with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any field is out of range.
    #[instrument(skip(self))]
    pub async fn update_settings(&self, settings: Settings) -> CoreResult<()> {
        settings.validate()?;
        self.inner.state.lock().await.settings = settings;

        info!("Settings updated");

        Ok(())
    }

    /// Empty the current log.
    #[instrument(skip(self))]
    pub async fn clear_recording(&self) -> CoreResult<()> {
        let mut state = self.inner.state.lock().await;
        state.require_idle("clear the recording")?;
        let settings = state.settings.clone();
        state.log = EventLog::new(settings);

        info!("Recording cleared");

        Ok(())
    }

    /// Save the current log, stamped with the current settings, to `path`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless idle, or `IoError` if writing fails.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn save_recording(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let log = {
            let state = self.inner.state.lock().await;
            state.require_idle("save a recording")?;
            EventLog {
                events: state.log.events.clone(),
                settings: state.settings.clone(),
            }
        };

        let path = path.as_ref().to_path_buf();
        tokio::task::spawn_blocking(move || persistence::save_recording(&log, &path))
            .await
            .map_err(|e| CoreError::from(io::Error::other(e)))?
    }

    /// Load a recording from `path`, replacing the current log and settings.
    ///
    /// Returns the number of events loaded.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless idle, `FormatError` for corrupt or
    /// incompatible files, or `IoError`. On error the current log and
    /// settings are untouched.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn load_recording(&self, path: impl AsRef<Path>) -> CoreResult<usize> {
        self.inner.state.lock().await.require_idle("load a recording")?;

        let path = path.as_ref().to_path_buf();
        let log = tokio::task::spawn_blocking(move || persistence::load_recording(&path))
            .await
            .map_err(|e| CoreError::from(io::Error::other(e)))??;

        let mut state = self.inner.state.lock().await;
        // A hotkey may have started something while the file was decoded.
        state.require_idle("load a recording")?;

        let event_count = log.len();
        state.settings = log.settings.clone();
        state.log = log;

        Ok(event_count)
    }

    /// Validate `request` against the transition table and carry it out.
    ///
    /// Returns a cancelled activity that the caller must join after
    /// releasing the lock.
    fn apply_locked(
        &self,
        state: &mut EngineState,
        request: ModeRequest,
    ) -> (CoreResult<Mode>, Option<Activity>) {
        let from = state.mode;
        if let Err(e) = from.apply(request) {
            return (Err(e), None);
        }

        let mut stopped = None;
        let to = match request {
            ModeRequest::StartRecord => {
                if let Err(e) = state.recorder.start(state.settings.clone()) {
                    return (Err(e), None);
                }
                let session_id = Uuid::new_v4();
                state.recording_session = Some(session_id);
                info!(session_id = %session_id, "Recording started");
                Mode::Recording
            }
            ModeRequest::StartPlay => {
                if state.log.is_empty() {
                    info!("Nothing to play, staying idle");
                    return (Ok(Mode::Idle), None);
                }
                state.activity = Some(self.spawn_player(state));
                Mode::Playing
            }
            ModeRequest::StartSpam => {
                state.activity = Some(self.spawn_spam_clicker());
                Mode::SpamClicking
            }
            ModeRequest::StopRecord
            | ModeRequest::StopPlay
            | ModeRequest::StopSpam
            | ModeRequest::ForceStop => {
                if from == Mode::Recording {
                    Self::finish_recording(state);
                }
                if let Some(activity) = state.activity.take() {
                    activity.cancel();
                    info!(
                        session_id = %activity.session_id,
                        duration_ms = activity.started_at.elapsed().as_millis(),
                        "Activity stop requested"
                    );
                    stopped = Some(activity);
                }
                Mode::Idle
            }
        };

        self.set_mode(state, to);

        (Ok(to), stopped)
    }

    fn finish_recording(state: &mut EngineState) {
        let session_id = state.recording_session.take();
        match state.recorder.stop() {
            Ok(log) => {
                info!(
                    session_id = ?session_id,
                    event_count = log.len(),
                    "Recording stopped"
                );
                state.log = log;
            }
            Err(e) => error!(error = ?e, "Recorder was not running"),
        }
    }

    fn spawn_player(&self, state: &EngineState) -> Activity {
        let session_id = Uuid::new_v4();
        let (cancel_tx, cancel_rx) = activity::cancellation();
        let events: Arc<[InputEvent]> = state.log.events.clone().into();
        let settings = state.settings.clone();

        info!(
            session_id = %session_id,
            event_count = events.len(),
            loop_count = settings.loop_count,
            speed = settings.speed_multiplier,
            "Playback started"
        );

        let player = Player {
            events,
            settings,
            injector: Arc::clone(&self.inner.injector),
            status_tx: self.inner.status_tx.clone(),
            session_id,
        };

        let engine = self.clone();
        let handle = tokio::spawn(async move {
            let outcome = player.run(cancel_rx).await;
            engine.finish_activity(session_id, outcome).await;
        });

        Activity::new(session_id, cancel_tx, handle)
    }

    fn spawn_spam_clicker(&self) -> Activity {
        let session_id = Uuid::new_v4();
        let (cancel_tx, cancel_rx) = activity::cancellation();

        info!(session_id = %session_id, "Spam clicking started");

        let clicker = SpamClicker {
            injector: Arc::clone(&self.inner.injector),
            session_id,
        };

        let engine = self.clone();
        let handle = tokio::spawn(async move {
            let outcome = clicker.run(cancel_rx).await;
            engine.finish_activity(session_id, outcome).await;
        });

        Activity::new(session_id, cancel_tx, handle)
    }

    /// Called by a background activity when it exits on its own.
    ///
    /// Outcomes from activities that were already stopped or replaced are
    /// ignored.
    async fn finish_activity(&self, session_id: Uuid, outcome: ActivityOutcome) {
        let mut state = self.inner.state.lock().await;

        let is_current = state
            .activity
            .as_ref()
            .is_some_and(|a| a.session_id == session_id);
        if !is_current {
            debug!(session_id = %session_id, outcome = ?outcome, "Stale activity finished");
            return;
        }

        match &outcome {
            ActivityOutcome::Completed => info!(session_id = %session_id, "Activity completed"),
            ActivityOutcome::Cancelled => info!(session_id = %session_id, "Activity cancelled"),
            ActivityOutcome::Failed(e) => {
                warn!(session_id = %session_id, error = %e, "Activity failed")
            }
        }

        // The task is exiting; dropping its handle detaches it.
        state.activity = None;
        self.set_mode(&mut state, Mode::Idle);
    }

    fn set_mode(&self, state: &mut EngineState, mode: Mode) {
        if state.mode == mode {
            return;
        }
        debug!(from = %state.mode, to = %mode, "Mode changed");
        state.mode = mode;
        let _ = self.inner.status_tx.send(StatusUpdate::ModeChanged(mode));
    }
}
