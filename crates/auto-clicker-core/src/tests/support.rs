use crate::{
    CoreError, CoreResult, Engine, EventLog, InputInjector, KeyCode, Mode, MouseButton, RawInput,
    RawInputKind, Settings,
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use error_location::ErrorLocation;

/// One call made on the injector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Injected {
    Click { button: MouseButton, x: i32, y: i32 },
    ClickAtCursor(MouseButton),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

/// Injector that records every call with the instant it was made.
#[derive(Default)]
pub(crate) struct RecordingInjector {
    calls: Mutex<Vec<(Injected, Instant)>>,
    failing: AtomicBool,
}

impl RecordingInjector {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every later call fail.
    pub(crate) fn fail_from_now(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<Injected> {
        self.timed_calls().into_iter().map(|(call, _)| call).collect()
    }

    pub(crate) fn timed_calls(&self) -> Vec<(Injected, Instant)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[track_caller]
    fn push(&self, call: Injected) -> CoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::InjectionFailed {
                reason: "simulated failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((call, Instant::now()));
        Ok(())
    }
}

impl InputInjector for RecordingInjector {
    fn click(&self, button: MouseButton, x: i32, y: i32) -> CoreResult<()> {
        self.push(Injected::Click { button, x, y })
    }

    fn click_at_cursor(&self, button: MouseButton) -> CoreResult<()> {
        self.push(Injected::ClickAtCursor(button))
    }

    fn key_down(&self, key: &KeyCode) -> CoreResult<()> {
        self.push(Injected::KeyDown(key.clone()))
    }

    fn key_up(&self, key: &KeyCode) -> CoreResult<()> {
        self.push(Injected::KeyUp(key.clone()))
    }
}

#[allow(clippy::unwrap_used)]
pub(crate) fn engine_with(settings: Settings) -> (Engine, Arc<RecordingInjector>) {
    let injector = RecordingInjector::new();
    let engine = Engine::new(injector.clone(), settings).unwrap();
    (engine, injector)
}

pub(crate) fn key_down(name: &str) -> RawInputKind {
    RawInputKind::KeyDown(KeyCode::from(name))
}

pub(crate) fn key_up(name: &str) -> RawInputKind {
    RawInputKind::KeyUp(KeyCode::from(name))
}

pub(crate) fn mouse_down(x: i32, y: i32) -> RawInputKind {
    RawInputKind::MouseDown {
        button: MouseButton::Left,
        x,
        y,
    }
}

/// Record `steps` as if each arrived `gap` after the previous one, without
/// waiting in real time.
#[allow(clippy::unwrap_used)]
pub(crate) async fn record(engine: &Engine, steps: &[(RawInputKind, Duration)]) -> EventLog {
    engine.start_recording().await.unwrap();

    let mut at = Instant::now();
    for (kind, gap) in steps {
        at += *gap;
        engine
            .record_input(RawInput {
                kind: kind.clone(),
                at,
            })
            .await;
    }

    engine.stop_recording().await.unwrap()
}

/// Poll until the engine reaches `mode`. Returns `false` on timeout.
pub(crate) async fn wait_for_mode(engine: &Engine, mode: Mode, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if engine.mode().await == mode {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    engine.mode().await == mode
}

/// Poll until `injector` has seen at least `count` calls.
pub(crate) async fn wait_for_calls(
    injector: &RecordingInjector,
    count: usize,
    timeout: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if injector.count() >= count {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    injector.count() >= count
}
