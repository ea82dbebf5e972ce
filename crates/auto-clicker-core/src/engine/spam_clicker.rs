use crate::{
    InputInjector, MouseButton,
    engine::activity::{self, ActivityOutcome},
};

use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, time::MissedTickBehavior};
use tracing::{info, instrument};
use uuid::Uuid;

/// Fixed spam-click period: 100 clicks per second.
pub const SPAM_CLICK_INTERVAL: Duration = Duration::from_millis(10);

/// Clicks the primary button at the cursor every [`SPAM_CLICK_INTERVAL`]
/// until cancelled.
pub(crate) struct SpamClicker {
    pub(crate) injector: Arc<dyn InputInjector>,
    pub(crate) session_id: Uuid,
}

impl SpamClicker {
    #[instrument(skip_all, fields(session_id = %self.session_id))]
    pub(crate) async fn run(self, mut cancel: watch::Receiver<bool>) -> ActivityOutcome {
        let mut ticker = tokio::time::interval(SPAM_CLICK_INTERVAL);
        // A slow injection must not cause a burst of catch-up clicks.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut clicks: u64 = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = activity::cancelled(&mut cancel) => break,
            }

            if activity::is_cancelled(&cancel) {
                break;
            }

            if let Err(e) = activity::inject(&self.injector, |i| i.click_at_cursor(MouseButton::Left)).await {
                info!(clicks, "Spam clicking aborted");
                return ActivityOutcome::Failed(e);
            }
            clicks += 1;
        }

        info!(clicks, "Spam clicking stopped");
        ActivityOutcome::Cancelled
    }
}
