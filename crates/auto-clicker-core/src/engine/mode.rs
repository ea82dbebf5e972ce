//! Mode state machine transition table.

use crate::{CoreError, CoreResult, HotkeyAction};

use std::{fmt, panic::Location};

use error_location::ErrorLocation;

/// The single activity the engine is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Nothing running.
    #[default]
    Idle,
    /// Capturing input into a new log.
    Recording,
    /// Replaying the current log.
    Playing,
    /// Generating rapid primary clicks.
    SpamClicking,
}

impl Mode {
    /// Whether an activity is running.
    pub fn is_active(self) -> bool {
        self != Mode::Idle
    }

    /// Resolve the mode reached by `request`, or reject it.
    ///
    /// Recording, playback and spam clicking can only be started from
    /// `Idle`, each can only be stopped by its own stop request, and
    /// force-stop ends any of them.
    #[track_caller]
    pub fn apply(self, request: ModeRequest) -> CoreResult<Mode> {
        let next = match (self, request) {
            (Mode::Idle, ModeRequest::StartRecord) => Some(Mode::Recording),
            (Mode::Idle, ModeRequest::StartPlay) => Some(Mode::Playing),
            (Mode::Idle, ModeRequest::StartSpam) => Some(Mode::SpamClicking),
            (Mode::Recording, ModeRequest::StopRecord)
            | (Mode::Playing, ModeRequest::StopPlay)
            | (Mode::SpamClicking, ModeRequest::StopSpam) => Some(Mode::Idle),
            (Mode::Recording | Mode::Playing | Mode::SpamClicking, ModeRequest::ForceStop) => {
                Some(Mode::Idle)
            }
            _ => None,
        };

        next.ok_or_else(|| CoreError::InvalidState {
            mode: self,
            operation: request.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Request a toggle hotkey stands for in this mode.
    ///
    /// The record, play and spam keys stop their own activity when it is
    /// running and ask to start it otherwise; the stop key always
    /// force-stops.
    pub fn toggle_request(self, action: HotkeyAction) -> ModeRequest {
        match (action, self) {
            (HotkeyAction::Record, Mode::Recording) => ModeRequest::StopRecord,
            (HotkeyAction::Record, _) => ModeRequest::StartRecord,
            (HotkeyAction::Play, Mode::Playing) => ModeRequest::StopPlay,
            (HotkeyAction::Play, _) => ModeRequest::StartPlay,
            (HotkeyAction::Spam, Mode::SpamClicking) => ModeRequest::StopSpam,
            (HotkeyAction::Spam, _) => ModeRequest::StartSpam,
            (HotkeyAction::Stop, _) => ModeRequest::ForceStop,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Idle => "idle",
            Mode::Recording => "recording",
            Mode::Playing => "playing",
            Mode::SpamClicking => "spam clicking",
        };
        f.write_str(name)
    }
}

/// A request to change mode, from a hotkey or an explicit caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeRequest {
    /// Begin capturing input.
    StartRecord,
    /// Finish capturing input.
    StopRecord,
    /// Begin replaying the current log.
    StartPlay,
    /// Cancel playback.
    StopPlay,
    /// Begin spam clicking.
    StartSpam,
    /// Stop spam clicking.
    StopSpam,
    /// Stop whatever is running.
    ForceStop,
}

impl fmt::Display for ModeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModeRequest::StartRecord => "start recording",
            ModeRequest::StopRecord => "stop recording",
            ModeRequest::StartPlay => "start playback",
            ModeRequest::StopPlay => "stop playback",
            ModeRequest::StartSpam => "start spam clicking",
            ModeRequest::StopSpam => "stop spam clicking",
            ModeRequest::ForceStop => "force-stop",
        };
        f.write_str(name)
    }
}
