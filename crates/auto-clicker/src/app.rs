use crate::{AppCommand, AppResult, app_command::HELP, config::Config, console};

use auto_clicker_core::{Engine, HotkeyAction, Mode, Settings, StatusUpdate};

use std::fs;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

/// Main application state.
///
/// Owns the configuration and applies console commands to the engine.
/// Status updates from the engine are logged and echoed to the console.
pub struct App {
    pub(crate) engine: Engine,
    pub(crate) config: Config,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Auto-Clicker starting");

        let mut status_rx = self.engine.subscribe();
        self.autoload().await;
        self.print_hotkeys().await;

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if cmd == AppCommand::Quit {
                        info!("Shutdown requested");
                        break;
                    }
                    self.handle_command(cmd).await;
                }

                update = status_rx.recv() => match update {
                    Ok(update) => report_status(update),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "Status observer lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },

                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        error!(error = ?e, "Failed to listen for Ctrl+C");
                    }
                    info!("Ctrl+C received, shutting down");
                    break;
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        if self.engine.mode().await.is_active()
            && let Err(e) = self.engine.force_stop().await
        {
            warn!(error = ?e, "Failed to stop running activity");
        }

        let _ = self.shutdown_tx.send(true);
        info!("Auto-Clicker shut down successfully");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn handle_command(&mut self, cmd: AppCommand) {
        if let Err(e) = self.apply_command(cmd).await {
            debug!(error = ?e, "Command failed");
            println!("{}", console::user_message(&e));
        }
    }

    async fn apply_command(&mut self, cmd: AppCommand) -> AppResult<()> {
        match cmd {
            AppCommand::Record => {
                let mode = self.engine.toggle(HotkeyAction::Record).await?;
                if mode == Mode::Idle {
                    println!("Recorded {} events", self.engine.event_count().await);
                }
            }
            AppCommand::Play => {
                if self.engine.toggle(HotkeyAction::Play).await? == Mode::Idle
                    && self.engine.log().await.is_empty()
                {
                    println!("Nothing to play");
                }
            }
            AppCommand::Spam => {
                self.engine.toggle(HotkeyAction::Spam).await?;
            }
            AppCommand::Stop => self.engine.force_stop().await?,
            AppCommand::Clear => {
                self.engine.clear_recording().await?;
                println!("Recording cleared");
            }
            AppCommand::Save(path) => {
                let path = self.config.resolve_recording_path(&path);
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir)?;
                }
                self.engine.save_recording(&path).await?;
                println!("Saved to {}", path.display());
            }
            AppCommand::Load(path) => {
                let path = self.config.resolve_recording_path(&path);
                let count = self.engine.load_recording(&path).await?;
                println!("Loaded {} events from {}", count, path.display());
            }
            AppCommand::Speed(speed) => {
                self.update_settings(|s| s.speed_multiplier = speed).await?;
            }
            AppCommand::Loops(count) => {
                self.update_settings(|s| s.loop_count = count).await?;
            }
            AppCommand::Delay(ms) => {
                self.update_settings(|s| s.loop_delay_ms = ms).await?;
            }
            AppCommand::Bind { action, key } => {
                self.engine.rebind_hotkey(action, key.clone()).await?;
                self.persist_settings().await?;
                println!("{} bound to {}", action, key);
            }
            AppCommand::Status => self.print_status().await,
            AppCommand::List => {
                let log = self.engine.log().await;
                if log.is_empty() {
                    println!("No events recorded");
                }
                for (i, event) in log.events.iter().enumerate() {
                    println!("{:>4} {}", i + 1, event);
                }
                if !log.is_empty() {
                    println!(
                        "{} events, {:.3}s per pass at 1x",
                        log.len(),
                        log.duration().as_secs_f64()
                    );
                }
            }
            AppCommand::Help => println!("{}", HELP),
            AppCommand::Quit => {}
        }

        Ok(())
    }

    /// Apply `change` to the current settings, then save them to the config
    /// file.
    async fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) -> AppResult<()> {
        let mut settings = self.engine.settings().await;
        change(&mut settings);
        self.engine.update_settings(settings).await?;
        self.persist_settings().await?;
        self.print_status().await;
        Ok(())
    }

    async fn persist_settings(&mut self) -> AppResult<()> {
        let settings = self.engine.settings().await;
        self.config.apply_settings(&settings);
        self.config.save()
    }

    async fn autoload(&self) {
        let Some(path) = self.config.storage.autoload.as_deref() else {
            return;
        };
        let path = self.config.resolve_recording_path(path);

        match self.engine.load_recording(&path).await {
            Ok(count) => info!(path = ?path, event_count = count, "Recording autoloaded"),
            Err(e) => warn!(path = ?path, error = %e, "Autoload failed"),
        }
    }

    async fn print_status(&self) {
        let settings = self.engine.settings().await;
        let loops = if settings.is_infinite() {
            "infinite".to_string()
        } else {
            settings.loop_count.to_string()
        };
        println!(
            "Mode: {} | events: {} | speed: {}x | loops: {} | delay: {} ms",
            self.engine.mode().await,
            self.engine.event_count().await,
            settings.speed_multiplier,
            loops,
            settings.loop_delay_ms
        );
    }

    async fn print_hotkeys(&self) {
        let hotkeys = self.engine.settings().await.hotkeys;
        println!(
            "Hotkeys: record={} play={} stop={} spam={}. Type `help` for commands.",
            hotkeys.record, hotkeys.play, hotkeys.stop, hotkeys.spam
        );
    }
}

fn report_status(update: StatusUpdate) {
    match update {
        StatusUpdate::ModeChanged(mode) => {
            info!(mode = %mode, "Mode changed");
            println!("[{}]", mode);
        }
        StatusUpdate::EventRecorded(event) => {
            debug!(event = %event, "Event recorded");
            println!("  {}", event);
        }
        StatusUpdate::PassStarted { pass, loop_count } => {
            if loop_count == 0 {
                println!("Pass {}", pass);
            } else {
                println!("Pass {}/{}", pass, loop_count);
            }
        }
        StatusUpdate::LoopDelay { remaining } => {
            debug!(remaining_ms = remaining.as_millis(), "Waiting for next pass");
        }
    }
}
