//! Global keyboard and mouse listener.
//!
//! `rdev::listen` blocks its thread for the life of the process, so it runs
//! on a dedicated OS thread and forwards notifications into the dispatcher's
//! channel.

use crate::{AppError, AppResult, keymap};

use auto_clicker_core::{RawInput, RawInputKind};

use std::{
    panic::Location,
    thread::{self, JoinHandle},
};

use error_location::ErrorLocation;
use rdev::{Event, EventType};
use tokio::sync::mpsc;
use tracing::{error, info, instrument, trace};

/// Start the listener thread.
///
/// The thread never returns while the hook is installed; if installing it
/// fails the error is logged and the thread exits, closing the channel.
#[track_caller]
#[instrument(skip(input_tx))]
pub(crate) fn spawn(input_tx: mpsc::UnboundedSender<RawInput>) -> AppResult<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("input-hook".to_string())
        .spawn(move || {
            let mut cursor = (0.0_f64, 0.0_f64);

            let callback = move |event: Event| {
                let Some(kind) = translate(&event.event_type, &mut cursor) else {
                    return;
                };
                trace!(kind = ?kind, "Raw input");
                // Receiver gone means shutdown is in progress.
                let _ = input_tx.send(RawInput::now(kind));
            };

            info!("Input hook listening");

            if let Err(e) = rdev::listen(callback) {
                error!(error = ?e, "Input hook failed, hotkeys and recording are unavailable");
            }
        })
        .map_err(|e| AppError::InputHookFailed {
            reason: format!("Failed to start listener thread: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(handle)
}

/// Map one listener event, tracking the cursor from move events since button
/// events carry no position.
fn translate(event: &EventType, cursor: &mut (f64, f64)) -> Option<RawInputKind> {
    match *event {
        EventType::KeyPress(key) => Some(RawInputKind::KeyDown(keymap::key_code(key))),
        EventType::KeyRelease(key) => Some(RawInputKind::KeyUp(keymap::key_code(key))),
        EventType::MouseMove { x, y } => {
            *cursor = (x, y);
            None
        }
        EventType::ButtonPress(button) => Some(RawInputKind::MouseDown {
            button: keymap::mouse_button(button)?,
            x: cursor.0.round() as i32,
            y: cursor.1.round() as i32,
        }),
        EventType::ButtonRelease(button) => Some(RawInputKind::MouseUp {
            button: keymap::mouse_button(button)?,
            x: cursor.0.round() as i32,
            y: cursor.1.round() as i32,
        }),
        EventType::Wheel { .. } => None,
    }
}
