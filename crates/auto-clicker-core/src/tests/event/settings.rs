use crate::{CoreError, HotkeyAction, Hotkeys, KeyCode, Settings};

use std::str::FromStr;

/// WHAT: Default settings pass validation
/// WHY: A fresh install must start without a configuration error
#[test]
fn given_default_settings_when_validating_then_ok() {
    // Given: Default settings
    let settings = Settings::default();

    // When: Validating
    let result = settings.validate();

    // Then: Accepted with the documented defaults
    assert!(result.is_ok());
    assert_eq!(settings.speed_multiplier, 1.0);
    assert_eq!(settings.loop_count, 1);
    assert_eq!(settings.loop_delay_ms, 0);
}

/// WHAT: Speed multipliers outside [0.1, 10.0] are rejected
/// WHY: Extreme speeds make playback meaningless or divide by zero
#[test]
fn given_out_of_range_speed_when_validating_then_config_error() {
    for speed in [0.0, 0.05, 10.5, -1.0, f64::NAN] {
        // Given: Settings with an invalid speed
        let settings = Settings {
            speed_multiplier: speed,
            ..Settings::default()
        };

        // When: Validating
        let result = settings.validate();

        // Then: ConfigError
        assert!(
            matches!(result, Err(CoreError::ConfigError { .. })),
            "speed {} accepted",
            speed
        );
    }
}

/// WHAT: Range boundaries are inclusive
/// WHY: 0.1x, 10x, 100 loops and 60 s delay are documented as allowed
#[test]
fn given_boundary_values_when_validating_then_ok() {
    // Given: Settings at every upper or lower bound
    let slow = Settings {
        speed_multiplier: 0.1,
        loop_count: 100,
        loop_delay_ms: 60_000,
        ..Settings::default()
    };
    let fast = Settings {
        speed_multiplier: 10.0,
        loop_count: 0,
        ..Settings::default()
    };

    // When/Then: Both validate
    assert!(slow.validate().is_ok());
    assert!(fast.validate().is_ok());
    assert!(fast.is_infinite());
}

/// WHAT: Loop count above 100 and delay above 60 s are rejected
/// WHY: Keeps finite playback bounded
#[test]
fn given_excessive_loops_or_delay_when_validating_then_config_error() {
    // Given: One setting past its limit each
    let too_many_loops = Settings {
        loop_count: 101,
        ..Settings::default()
    };
    let too_long_delay = Settings {
        loop_delay_ms: 60_001,
        ..Settings::default()
    };

    // When/Then: Both rejected
    assert!(matches!(
        too_many_loops.validate(),
        Err(CoreError::ConfigError { .. })
    ));
    assert!(matches!(
        too_long_delay.validate(),
        Err(CoreError::ConfigError { .. })
    ));
}

/// WHAT: Binding a key already used by another action fails
/// WHY: One key must never trigger two actions
#[test]
fn given_key_bound_to_play_when_rebinding_record_then_error_and_map_unchanged() {
    // Given: Default hotkeys (play = F2)
    let mut hotkeys = Hotkeys::default();
    let before = hotkeys.clone();

    // When: Binding record to F2
    let result = hotkeys.rebind(HotkeyAction::Record, KeyCode::from("F2"));

    // Then: ConfigError and nothing changed
    assert!(matches!(result, Err(CoreError::ConfigError { .. })));
    assert_eq!(hotkeys, before);
}

/// WHAT: Rebinding to a free key updates lookup in both directions
/// WHY: The dispatcher resolves actions by key
#[test]
fn given_free_key_when_rebinding_then_action_resolves_to_new_key() {
    // Given: Default hotkeys
    let mut hotkeys = Hotkeys::default();

    // When: Binding spam to F9
    let result = hotkeys.rebind(HotkeyAction::Spam, KeyCode::from("F9"));

    // Then: F9 triggers spam and F3 is free
    assert!(result.is_ok());
    assert_eq!(
        hotkeys.action_for(&KeyCode::from("F9")),
        Some(HotkeyAction::Spam)
    );
    assert_eq!(hotkeys.action_for(&KeyCode::from("F3")), None);
    assert_eq!(hotkeys.key_for(HotkeyAction::Spam), &KeyCode::from("F9"));
}

/// WHAT: Rebinding an action to the key it already has succeeds
/// WHY: Re-saving unchanged settings must not fail
#[test]
fn given_same_key_when_rebinding_same_action_then_ok() {
    // Given: Default hotkeys
    let mut hotkeys = Hotkeys::default();

    // When: Binding stop to Escape again
    let result = hotkeys.rebind(HotkeyAction::Stop, KeyCode::from("Escape"));

    // Then: Accepted
    assert!(result.is_ok());
    assert_eq!(hotkeys, Hotkeys::default());
}

/// WHAT: Blank key names are rejected
/// WHY: A blank binding would silently disable the action
#[test]
fn given_blank_key_when_rebinding_then_config_error() {
    // Given: Default hotkeys
    let mut hotkeys = Hotkeys::default();

    // When: Binding play to whitespace
    let result = hotkeys.rebind(HotkeyAction::Play, KeyCode::from("  "));

    // Then: Rejected
    assert!(matches!(result, Err(CoreError::ConfigError { .. })));
}

/// WHAT: Duplicate keys in a hotkey map fail validation
/// WHY: Maps read from disk bypass rebind and must be checked
#[test]
fn given_duplicate_keys_when_validating_then_config_error() {
    // Given: Record and stop both on F1
    let hotkeys = Hotkeys {
        stop: KeyCode::from("F1"),
        ..Hotkeys::default()
    };

    // When/Then: Rejected
    assert!(matches!(
        hotkeys.validate(),
        Err(CoreError::ConfigError { .. })
    ));
}

/// WHAT: Action names parse case-insensitively
/// WHY: Console users type `bind Play F5` as often as `bind play F5`
#[test]
#[allow(clippy::unwrap_used)]
fn given_action_names_when_parsing_then_actions_resolve() {
    // Given/When: Parsing known and unknown names
    let play = HotkeyAction::from_str("Play").unwrap();
    let spam = HotkeyAction::from_str("spam").unwrap();
    let unknown = HotkeyAction::from_str("jump");

    // Then: Known names resolve, unknown is a ConfigError
    assert_eq!(play, HotkeyAction::Play);
    assert_eq!(spam, HotkeyAction::Spam);
    assert!(matches!(unknown, Err(CoreError::ConfigError { .. })));
}
