//! Background activity plumbing shared by playback and spam clicking.
//!
//! Each activity runs as its own task holding a `watch` receiver as its
//! cancellation token. Every suspension point races the token, so a stop
//! request is observed within one sleep.

use crate::{CoreError, CoreResult, InputInjector};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::{sync::watch, task::JoinHandle, time::Instant};
use tracing::{debug, warn};
use uuid::Uuid;

/// How long a stop request waits for the cancelled task to wind down.
const JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// How a background activity ended.
#[derive(Debug)]
pub(crate) enum ActivityOutcome {
    /// Ran to its natural end.
    Completed,
    /// Stopped by a cancellation request.
    Cancelled,
    /// Aborted by an injection failure.
    Failed(CoreError),
}

/// Handle to a running activity, owned by the engine state.
pub(crate) struct Activity {
    pub(crate) session_id: Uuid,
    pub(crate) started_at: std::time::Instant,
    cancel_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Activity {
    pub(crate) fn new(session_id: Uuid, cancel_tx: watch::Sender<bool>, handle: JoinHandle<()>) -> Self {
        Self {
            session_id,
            started_at: std::time::Instant::now(),
            cancel_tx,
            handle,
        }
    }

    /// Signal the task to stop at its next suspension point.
    pub(crate) fn cancel(&self) {
        // send_replace never fails, even when the task already exited.
        self.cancel_tx.send_replace(true);
    }

    /// Wait for the cancelled task to exit.
    ///
    /// Must be called without holding the engine lock: the task reports its
    /// outcome through the engine before exiting.
    pub(crate) async fn join(self) {
        let session_id = self.session_id;
        match tokio::time::timeout(JOIN_TIMEOUT, self.handle).await {
            Ok(Ok(())) => debug!(session_id = %session_id, "Activity stopped cleanly"),
            Ok(Err(e)) => warn!(session_id = %session_id, error = ?e, "Activity task panicked"),
            Err(_) => warn!(
                session_id = %session_id,
                "Activity did not stop within timeout, leaving it to finish on its own"
            ),
        }
    }
}

/// Create a fresh cancellation token pair.
pub(crate) fn cancellation() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

pub(crate) fn is_cancelled(cancel: &watch::Receiver<bool>) -> bool {
    *cancel.borrow()
}

/// Resolve once cancellation is requested or the engine side is gone.
pub(crate) async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    let _ = cancel.wait_for(|stop| *stop).await;
}

/// Sleep until `deadline` unless cancelled first.
///
/// Returns `true` when the activity must stop. The token is checked again
/// after waking, so a request that lands while the timer fires still wins.
pub(crate) async fn sleep_until_cancelled(deadline: Instant, cancel: &mut watch::Receiver<bool>) -> bool {
    if is_cancelled(cancel) {
        return true;
    }

    tokio::select! {
        _ = tokio::time::sleep_until(deadline) => is_cancelled(cancel),
        _ = cancelled(cancel) => true,
    }
}

/// Run one synchronous injection on the blocking pool.
#[track_caller]
pub(crate) fn inject<F>(
    injector: &Arc<dyn InputInjector>,
    action: F,
) -> impl Future<Output = CoreResult<()>> + Send + 'static
where
    F: FnOnce(&dyn InputInjector) -> CoreResult<()> + Send + 'static,
{
    let location = ErrorLocation::from(Location::caller());
    let injector = Arc::clone(injector);
    let task = tokio::task::spawn_blocking(move || action(injector.as_ref()));

    async move {
        task.await.map_err(|e| CoreError::InjectionFailed {
            reason: format!("Injection task panicked: {}", e),
            location,
        })?
    }
}
