use crate::{AppError, AppResult, keymap};

use auto_clicker_core::{HotkeyAction, KeyCode};

use std::{panic::Location, path::PathBuf, str::FromStr};

use error_location::ErrorLocation;

/// Commands sent from the console to the main application.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Toggle recording.
    Record,
    /// Toggle playback.
    Play,
    /// Toggle spam clicking.
    Spam,
    /// Stop whatever is running.
    Stop,
    /// Empty the current recording.
    Clear,
    /// Save the current recording.
    Save(PathBuf),
    /// Load a recording.
    Load(PathBuf),
    /// Set the playback speed multiplier.
    Speed(f64),
    /// Set the number of passes, 0 for infinite.
    Loops(u32),
    /// Set the pause between passes in milliseconds.
    Delay(u64),
    /// Bind a hotkey.
    Bind {
        /// Action to rebind.
        action: HotkeyAction,
        /// New key.
        key: KeyCode,
    },
    /// Print mode and settings.
    Status,
    /// Print the current recording.
    List,
    /// Print the command list.
    Help,
    /// Request application shutdown.
    Quit,
}

/// Console usage text.
pub(crate) const HELP: &str = "\
Commands:
  record             start/stop recording
  play               start/stop playback
  spam               start/stop spam clicking
  stop               stop whatever is running
  clear              discard the current recording
  save <path>        save the recording (.aclk)
  load <path>        load a recording
  speed <x>          playback speed, 0.1 to 10
  loops <n>          passes per playback, 0 = infinite
  delay <ms>         pause between passes
  bind <action> <key>  rebind record/play/stop/spam
  status             show mode and settings
  list               show recorded events
  help               show this text
  quit               exit";

impl FromStr for AppCommand {
    type Err = AppError;

    #[track_caller]
    fn from_str(line: &str) -> AppResult<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(invalid("Empty command"));
        };
        let rest: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("record", []) => AppCommand::Record,
            ("play", []) => AppCommand::Play,
            ("spam", []) => AppCommand::Spam,
            ("stop", []) => AppCommand::Stop,
            ("clear", []) => AppCommand::Clear,
            ("status", []) => AppCommand::Status,
            ("list", []) => AppCommand::List,
            ("help" | "?", []) => AppCommand::Help,
            ("quit" | "exit", []) => AppCommand::Quit,
            ("save", [_, ..]) => AppCommand::Save(PathBuf::from(rest.join(" "))),
            ("load", [_, ..]) => AppCommand::Load(PathBuf::from(rest.join(" "))),
            ("speed", [value]) => AppCommand::Speed(
                value
                    .parse()
                    .map_err(|_| invalid(format!("Not a number: {}", value)))?,
            ),
            ("loops", [value]) => AppCommand::Loops(
                value
                    .parse()
                    .map_err(|_| invalid(format!("Not a loop count: {}", value)))?,
            ),
            ("delay", [value]) => AppCommand::Delay(
                value
                    .parse()
                    .map_err(|_| invalid(format!("Not a delay in ms: {}", value)))?,
            ),
            ("bind", [action, key]) => AppCommand::Bind {
                action: action.parse().map_err(|e| AppError::InvalidCommand {
                    reason: format!("{}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?,
                key: keymap::parse_key_name(key),
            },
            (
                "record" | "play" | "spam" | "stop" | "clear" | "status" | "list" | "help" | "?"
                | "quit" | "exit" | "save" | "load" | "speed" | "loops" | "delay" | "bind",
                _,
            ) => return Err(invalid(format!("Wrong arguments for {}", name))),
            _ => return Err(invalid(format!("Unknown command: {}", name))),
        };

        Ok(command)
    }
}

#[track_caller]
fn invalid(reason: impl Into<String>) -> AppError {
    AppError::InvalidCommand {
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}
