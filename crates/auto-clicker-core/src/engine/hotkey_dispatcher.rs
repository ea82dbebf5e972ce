//! Routes raw input notifications to the engine.
//!
//! Keys bound to a hotkey become mode requests; everything else is handed to
//! the recorder. Hotkey requests the current mode rejects are dropped.

use crate::{CoreResult, Engine, KeyCode, RawInput, RawInputKind};

use std::collections::HashSet;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument};

/// Single consumer of the raw input channel.
pub struct HotkeyDispatcher {
    engine: Engine,
    /// Hotkeys currently held down, so OS auto-repeat does not re-trigger.
    held: HashSet<KeyCode>,
}

impl HotkeyDispatcher {
    /// Create a dispatcher feeding `engine`.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            held: HashSet::new(),
        }
    }

    /// Handle one notification.
    pub async fn dispatch(&mut self, raw: RawInput) {
        match raw.kind.clone() {
            RawInputKind::KeyDown(key) => {
                if self.held.contains(&key) {
                    return;
                }

                match self.engine.trigger_hotkey(&key).await {
                    Some(Ok(mode)) => {
                        self.held.insert(key);
                        debug!(mode = %mode, "Hotkey applied");
                    }
                    Some(Err(e)) => {
                        self.held.insert(key);
                        debug!(error = %e, "Hotkey request rejected, dropping");
                    }
                    None => self.engine.record_input(raw).await,
                }
            }
            RawInputKind::KeyUp(key) => {
                if self.held.remove(&key) {
                    return;
                }
                self.engine.record_input(raw).await;
            }
            RawInputKind::MouseDown { .. } | RawInputKind::MouseUp { .. } => {
                self.engine.record_input(raw).await;
            }
        }
    }

    /// Drain `input_rx` until shutdown or until every sender is gone.
    #[instrument(skip_all)]
    pub async fn run(
        mut self,
        mut input_rx: mpsc::UnboundedReceiver<RawInput>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> CoreResult<()> {
        info!("Hotkey dispatcher started");

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey dispatcher shutting down");
                    break;
                }
                raw = input_rx.recv() => match raw {
                    Some(raw) => self.dispatch(raw).await,
                    None => {
                        info!("Input source closed, hotkey dispatcher stopping");
                        break;
                    }
                },
            }
        }

        Ok(())
    }
}
