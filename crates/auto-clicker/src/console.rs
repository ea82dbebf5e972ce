//! Line-oriented console: reads commands from stdin and forwards them to
//! the application loop.

use crate::{AppCommand, AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{mpsc, watch},
};
use tracing::{debug, info, instrument};

/// Read stdin until EOF or shutdown.
///
/// Unparseable lines are reported to the user and skipped. EOF is treated as
/// `quit`.
#[instrument(skip_all)]
pub(crate) async fn run(
    command_tx: mpsc::Sender<AppCommand>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                debug!("Console shutting down");
                break;
            }
            line = lines.next_line() => {
                let command = match line? {
                    Some(line) if line.trim().is_empty() => continue,
                    Some(line) => match line.parse::<AppCommand>() {
                        Ok(command) => command,
                        Err(e) => {
                            println!("{}", user_message(&e));
                            continue;
                        }
                    },
                    None => {
                        info!("Console input closed");
                        AppCommand::Quit
                    }
                };

                let quit = command == AppCommand::Quit;
                command_tx
                    .send(command)
                    .await
                    .map_err(|e| AppError::ChannelSendFailed {
                        message: format!("Failed to send console command: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;

                if quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Error text without source locations, for printing to the user.
pub(crate) fn user_message(error: &AppError) -> String {
    match error {
        AppError::InvalidCommand { reason, .. } => format!("{} (type `help`)", reason),
        AppError::Core { source, .. } => core_message(source),
        other => other.to_string(),
    }
}

fn core_message(error: &auto_clicker_core::CoreError) -> String {
    use auto_clicker_core::CoreError;

    match error {
        CoreError::InvalidState {
            mode, operation, ..
        } => format!("Cannot {} while {}", operation, mode),
        CoreError::ConfigError { reason, .. }
        | CoreError::FormatError { reason, .. }
        | CoreError::InjectionFailed { reason, .. } => reason.clone(),
        CoreError::IoError { source, .. } => source.to_string(),
    }
}
