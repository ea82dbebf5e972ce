//! Input simulation through enigo.
//!
//! `Enigo` holds a platform connection that must stay on the thread that
//! created it, so a dedicated thread owns it and executes requests sent
//! over a channel. Each call blocks until its request has been carried out.

use crate::{AppError, AppResult, keymap};

use auto_clicker_core::{CoreError, CoreResult, InputInjector, KeyCode, MouseButton};

use std::{
    panic::Location,
    sync::mpsc::{self, Sender},
    thread,
};

use enigo::{Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};
use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

enum InjectCommand {
    Click {
        button: enigo::Button,
        x: i32,
        y: i32,
    },
    ClickAtCursor(enigo::Button),
    Key(enigo::Key, Direction),
}

struct InjectRequest {
    command: InjectCommand,
    reply: Sender<Result<(), String>>,
}

/// [`InputInjector`] backed by a dedicated enigo thread.
pub struct EnigoInjector {
    request_tx: Sender<InjectRequest>,
}

impl EnigoInjector {
    /// Start the injector thread and connect to the platform input API.
    ///
    /// # Errors
    ///
    /// Returns `InjectorUnavailable` if enigo cannot connect (e.g. missing
    /// accessibility permission or no display).
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let (request_tx, request_rx) = mpsc::channel::<InjectRequest>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        thread::Builder::new()
            .name("enigo-injector".to_string())
            .spawn(move || {
                let mut enigo = match Enigo::new(&Settings::default()) {
                    Ok(enigo) => {
                        let _ = ready_tx.send(Ok(()));
                        enigo
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };

                while let Ok(request) = request_rx.recv() {
                    let result = execute(&mut enigo, request.command);
                    let _ = request.reply.send(result);
                }

                debug!("Injector thread exiting");
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                info!("EnigoInjector initialized");
                Ok(Self { request_tx })
            }
            Ok(Err(reason)) => Err(AppError::InjectorUnavailable {
                reason: format!("Failed to create Enigo: {}", reason),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => Err(AppError::InjectorUnavailable {
                reason: "Injector thread exited during startup".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    #[track_caller]
    fn send(&self, command: InjectCommand) -> CoreResult<()> {
        let location = ErrorLocation::from(Location::caller());
        let (reply_tx, reply_rx) = mpsc::channel();

        if self
            .request_tx
            .send(InjectRequest {
                command,
                reply: reply_tx,
            })
            .is_err()
        {
            return Err(CoreError::InjectionFailed {
                reason: "Injector thread is gone".to_string(),
                location,
            });
        }

        match reply_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(reason)) => Err(CoreError::InjectionFailed { reason, location }),
            Err(_) => Err(CoreError::InjectionFailed {
                reason: "Injector thread dropped the request".to_string(),
                location,
            }),
        }
    }

    #[track_caller]
    fn key(&self, key: &KeyCode, direction: Direction) -> CoreResult<()> {
        let Some(mapped) = keymap::enigo_key(key) else {
            return Err(CoreError::InjectionFailed {
                reason: format!("Key {} cannot be simulated", key),
                location: ErrorLocation::from(Location::caller()),
            });
        };
        self.send(InjectCommand::Key(mapped, direction))
    }
}

impl InputInjector for EnigoInjector {
    fn click(&self, button: MouseButton, x: i32, y: i32) -> CoreResult<()> {
        self.send(InjectCommand::Click {
            button: keymap::enigo_button(button),
            x,
            y,
        })
    }

    fn click_at_cursor(&self, button: MouseButton) -> CoreResult<()> {
        self.send(InjectCommand::ClickAtCursor(keymap::enigo_button(button)))
    }

    fn key_down(&self, key: &KeyCode) -> CoreResult<()> {
        self.key(key, Direction::Press)
    }

    fn key_up(&self, key: &KeyCode) -> CoreResult<()> {
        self.key(key, Direction::Release)
    }
}

fn execute(enigo: &mut Enigo, command: InjectCommand) -> Result<(), String> {
    let result = match command {
        InjectCommand::Click { button, x, y } => enigo
            .move_mouse(x, y, Coordinate::Abs)
            .and_then(|()| enigo.button(button, Direction::Click)),
        InjectCommand::ClickAtCursor(button) => enigo.button(button, Direction::Click),
        InjectCommand::Key(key, direction) => enigo.key(key, direction),
    };

    result.map_err(|e| e.to_string())
}
