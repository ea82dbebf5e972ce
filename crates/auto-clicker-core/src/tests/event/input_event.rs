use crate::{EventLog, InputEvent, KeyCode, MouseButton, Settings};

use std::time::Duration;

/// WHAT: Events render as one human-readable line
/// WHY: The console `list` command prints the log with this format
#[test]
fn given_events_when_displayed_then_offset_and_action_shown() {
    // Given: A click and a key press
    let click = InputEvent::MouseClick {
        button: MouseButton::Left,
        x: 100,
        y: 200,
        offset: Duration::ZERO,
    };
    let press = InputEvent::KeyPress {
        key: KeyCode::from("KeyA"),
        offset: Duration::from_millis(500),
    };
    let release = InputEvent::KeyRelease {
        key: KeyCode::from("KeyA"),
        offset: Duration::from_micros(1_250),
    };

    // When/Then: Rendered with three-decimal offsets
    assert_eq!(
        click.to_string(),
        "[+0.000s] Mouse Click: Left at (100, 200)"
    );
    assert_eq!(press.to_string(), "[+0.500s] Key Press: KeyA");
    assert_eq!(release.to_string(), "[+0.001s] Key Release: KeyA");
}

/// WHAT: Offsets scale inversely with the speed multiplier
/// WHY: Playback at 2x must halve every gap
#[test]
fn given_offset_when_scaling_then_divided_by_speed() {
    // Given: A key press 500 ms after its predecessor
    let press = InputEvent::KeyPress {
        key: KeyCode::from("KeyA"),
        offset: Duration::from_millis(500),
    };

    // When/Then: Scaled at several speeds
    assert_eq!(press.scaled_offset(2.0), Duration::from_millis(250));
    assert_eq!(press.scaled_offset(0.5), Duration::from_millis(1_000));
    assert_eq!(press.scaled_offset(1.0), Duration::from_millis(500));
}

/// WHAT: Log duration is the sum of all offsets
/// WHY: Used to report how long one pass takes
#[test]
fn given_log_when_measuring_duration_then_offsets_summed() {
    // Given: A log with three events
    let mut log = EventLog::new(Settings::default());
    for ms in [0, 120, 380] {
        log.events.push(InputEvent::KeyPress {
            key: KeyCode::from("KeyB"),
            offset: Duration::from_millis(ms),
        });
    }

    // When/Then: Durations add up
    assert_eq!(log.len(), 3);
    assert_eq!(log.duration(), Duration::from_millis(500));
    assert!(EventLog::default().is_empty());
}
