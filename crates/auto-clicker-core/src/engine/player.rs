use crate::{
    CoreResult, InputEvent, InputInjector, KeyCode, Settings, StatusUpdate,
    engine::activity::{self, ActivityOutcome},
};

use std::{collections::HashSet, sync::Arc, time::Duration};

use tokio::{
    sync::{broadcast, watch},
    time::Instant,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Interval between countdown updates while waiting between passes.
pub(crate) const COUNTDOWN_TICK: Duration = Duration::from_millis(100);

/// One playback run: an immutable snapshot of the events and the settings
/// fixed for its whole duration.
pub(crate) struct Player {
    pub(crate) events: Arc<[InputEvent]>,
    pub(crate) settings: Settings,
    pub(crate) injector: Arc<dyn InputInjector>,
    pub(crate) status_tx: broadcast::Sender<StatusUpdate>,
    pub(crate) session_id: Uuid,
}

impl Player {
    /// Replay every pass, then release any key still held down.
    #[instrument(skip_all, fields(session_id = %self.session_id))]
    pub(crate) async fn run(self, mut cancel: watch::Receiver<bool>) -> ActivityOutcome {
        let mut held = HashSet::new();
        let outcome = self.play_passes(&mut cancel, &mut held).await;
        self.release_held(held).await;
        outcome
    }

    async fn play_passes(
        &self,
        cancel: &mut watch::Receiver<bool>,
        held: &mut HashSet<KeyCode>,
    ) -> ActivityOutcome {
        let loop_count = self.settings.loop_count;
        let speed = self.settings.speed_multiplier;
        let mut pass: u32 = 0;

        loop {
            if loop_count != 0 && pass >= loop_count {
                info!(passes = pass, "Playback complete");
                return ActivityOutcome::Completed;
            }

            if pass > 0 && self.wait_between_passes(cancel).await {
                return ActivityOutcome::Cancelled;
            }

            pass = pass.saturating_add(1);
            let _ = self
                .status_tx
                .send(StatusUpdate::PassStarted { pass, loop_count });
            debug!(pass, loop_count, "Pass started");

            // Deadlines chain from the pass start so injection latency does
            // not accumulate across events.
            let mut deadline = Instant::now();
            for event in self.events.iter() {
                deadline += event.scaled_offset(speed);

                if activity::sleep_until_cancelled(deadline, cancel).await {
                    return ActivityOutcome::Cancelled;
                }

                if let Err(e) = self.replay(event, held).await {
                    return ActivityOutcome::Failed(e);
                }
            }
        }
    }

    /// Returns `true` if cancelled while waiting.
    async fn wait_between_passes(&self, cancel: &mut watch::Receiver<bool>) -> bool {
        let delay = Duration::from_millis(self.settings.loop_delay_ms);
        let end = Instant::now() + delay;

        loop {
            let now = Instant::now();
            if now >= end {
                return activity::is_cancelled(cancel);
            }

            let _ = self.status_tx.send(StatusUpdate::LoopDelay {
                remaining: end - now,
            });

            if activity::sleep_until_cancelled((now + COUNTDOWN_TICK).min(end), cancel).await {
                return true;
            }
        }
    }

    async fn replay(&self, event: &InputEvent, held: &mut HashSet<KeyCode>) -> CoreResult<()> {
        match event {
            InputEvent::MouseClick { button, x, y, .. } => {
                let (button, x, y) = (*button, *x, *y);
                activity::inject(&self.injector, move |i| i.click(button, x, y)).await
            }
            InputEvent::KeyPress { key, .. } => {
                let pressed = key.clone();
                activity::inject(&self.injector, move |i| i.key_down(&pressed)).await?;
                held.insert(key.clone());
                Ok(())
            }
            InputEvent::KeyRelease { key, .. } => {
                let released = key.clone();
                activity::inject(&self.injector, move |i| i.key_up(&released)).await?;
                held.remove(key);
                Ok(())
            }
        }
    }

    async fn release_held(&self, held: HashSet<KeyCode>) {
        for key in held {
            debug!(key = %key, "Releasing key left down by playback");
            let released = key.clone();
            if let Err(e) = activity::inject(&self.injector, move |i| i.key_up(&released)).await {
                warn!(key = %key, error = ?e, "Failed to release key");
            }
        }
    }
}
