use crate::{CoreError, HotkeyAction, Mode, ModeRequest};

const ALL_MODES: [Mode; 4] = [Mode::Idle, Mode::Recording, Mode::Playing, Mode::SpamClicking];

const ALL_REQUESTS: [ModeRequest; 7] = [
    ModeRequest::StartRecord,
    ModeRequest::StopRecord,
    ModeRequest::StartPlay,
    ModeRequest::StopPlay,
    ModeRequest::StartSpam,
    ModeRequest::StopSpam,
    ModeRequest::ForceStop,
];

/// WHAT: Only the documented transitions are accepted
/// WHY: Exactly one activity may run at a time
#[test]
fn given_every_mode_and_request_when_applying_then_table_holds() {
    for mode in ALL_MODES {
        for request in ALL_REQUESTS {
            // Given: A mode and a request
            let expected = match (mode, request) {
                (Mode::Idle, ModeRequest::StartRecord) => Some(Mode::Recording),
                (Mode::Idle, ModeRequest::StartPlay) => Some(Mode::Playing),
                (Mode::Idle, ModeRequest::StartSpam) => Some(Mode::SpamClicking),
                (Mode::Recording, ModeRequest::StopRecord) => Some(Mode::Idle),
                (Mode::Playing, ModeRequest::StopPlay) => Some(Mode::Idle),
                (Mode::SpamClicking, ModeRequest::StopSpam) => Some(Mode::Idle),
                (Mode::Recording | Mode::Playing | Mode::SpamClicking, ModeRequest::ForceStop) => {
                    Some(Mode::Idle)
                }
                _ => None,
            };

            // When: Applying it
            let result = mode.apply(request);

            // Then: Matches the table
            match expected {
                Some(next) => assert_eq!(result.ok(), Some(next), "{} from {}", request, mode),
                None => assert!(
                    matches!(result, Err(CoreError::InvalidState { mode: m, .. }) if m == mode),
                    "{} from {} accepted",
                    request,
                    mode
                ),
            }
        }
    }
}

/// WHAT: Starting spam while recording or playing is rejected
/// WHY: Spam clicks would corrupt the recording or the replay
#[test]
#[allow(clippy::panic)]
fn given_recording_or_playing_when_starting_spam_then_invalid_state() {
    for mode in [Mode::Recording, Mode::Playing] {
        // Given/When: A start-spam request in a busy mode
        let result = mode.apply(ModeRequest::StartSpam);

        // Then: Rejected and the error names the operation
        match result {
            Err(CoreError::InvalidState {
                mode: m, operation, ..
            }) => {
                assert_eq!(m, mode);
                assert_eq!(operation, "start spam clicking");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

/// WHAT: Force-stop from Idle is rejected
/// WHY: There is nothing to stop
#[test]
fn given_idle_when_force_stopping_then_invalid_state() {
    // Given/When: Force-stop while idle
    let result = Mode::Idle.apply(ModeRequest::ForceStop);

    // Then: Rejected
    assert!(matches!(result, Err(CoreError::InvalidState { .. })));
}

/// WHAT: Toggle hotkeys map to start or stop depending on the mode
/// WHY: One key both starts and stops its own activity
#[test]
fn given_hotkey_actions_when_resolving_toggle_then_request_depends_on_mode() {
    // Given/When/Then: Each action in a representative mode
    assert_eq!(
        Mode::Idle.toggle_request(HotkeyAction::Record),
        ModeRequest::StartRecord
    );
    assert_eq!(
        Mode::Recording.toggle_request(HotkeyAction::Record),
        ModeRequest::StopRecord
    );
    assert_eq!(
        Mode::Playing.toggle_request(HotkeyAction::Play),
        ModeRequest::StopPlay
    );
    assert_eq!(
        Mode::Recording.toggle_request(HotkeyAction::Play),
        ModeRequest::StartPlay
    );
    assert_eq!(
        Mode::SpamClicking.toggle_request(HotkeyAction::Spam),
        ModeRequest::StopSpam
    );
    assert_eq!(
        Mode::Idle.toggle_request(HotkeyAction::Stop),
        ModeRequest::ForceStop
    );
}
