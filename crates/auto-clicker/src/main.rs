//! Auto-Clicker: record, replay and spam mouse and keyboard input with global
//! hotkey control.

mod app;
mod app_command;
mod config;
mod console;
mod enigo_injector;
mod error;
mod input_hook;
mod keymap;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    enigo_injector::EnigoInjector,
    error::{AppError, Result as AppResult},
};

use crate::config::Config;

use auto_clicker_core::{Engine, HotkeyDispatcher};

use std::{sync::Arc, time::Duration};

use tokio::sync::{mpsc, watch};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("auto_clicker=debug,auto_clicker_core=debug")),
        )
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let result = rt.block_on(run(config));

    // Blocking stdin reads never finish on their own.
    rt.shutdown_timeout(Duration::from_secs(1));

    if let Err(e) = result {
        error!("Auto-Clicker failed: {:?}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> AppResult<()> {
    let settings = config.to_settings()?;
    let injector = Arc::new(EnigoInjector::new()?);
    let engine = Engine::new(injector, settings)?;

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    // Detached: the listener cannot be stopped once installed.
    let _hook = input_hook::spawn(input_tx)?;

    let (command_tx, command_rx) = mpsc::channel(32);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let dispatcher = HotkeyDispatcher::new(engine.clone());

    let app = App {
        engine,
        config,
        command_rx,
        shutdown_tx,
    };

    let dispatcher_shutdown_rx = shutdown_rx.clone();

    tokio::join!(
        async {
            if let Err(e) = dispatcher.run(input_rx, dispatcher_shutdown_rx).await {
                error!(error = ?e, "Hotkey dispatcher error");
            }
        },
        async {
            if let Err(e) = console::run(command_tx, shutdown_rx).await {
                error!(error = ?e, "Console error");
            }
        },
        async {
            if let Err(e) = app.run().await {
                error!(error = ?e, "App error");
            }
        }
    );

    info!("All tasks finished");

    Ok(())
}
