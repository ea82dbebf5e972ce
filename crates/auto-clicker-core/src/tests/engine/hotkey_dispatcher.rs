use crate::{
    HotkeyAction, HotkeyDispatcher, InputEvent, KeyCode, Mode, RawInput, Settings,
    tests::support::{engine_with, key_down, key_up, mouse_down, wait_for_mode},
};

use std::time::Duration;

use tokio::sync::{mpsc, watch};

/// WHAT: The record hotkey toggles recording and is kept out of the log
/// WHY: Users start and stop capture with the same key
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_record_hotkey_when_pressed_twice_then_recording_toggles() {
    // Given: A dispatcher with default hotkeys (record = F1)
    let (engine, _injector) = engine_with(Settings::default());
    let mut dispatcher = HotkeyDispatcher::new(engine.clone());

    // When: F1, a typed key, F1
    dispatcher.dispatch(RawInput::now(key_down("F1"))).await;
    assert_eq!(engine.mode().await, Mode::Recording);
    dispatcher.dispatch(RawInput::now(key_up("F1"))).await;
    dispatcher.dispatch(RawInput::now(key_down("KeyA"))).await;
    dispatcher.dispatch(RawInput::now(key_up("KeyA"))).await;
    dispatcher.dispatch(RawInput::now(key_down("F1"))).await;
    dispatcher.dispatch(RawInput::now(key_up("F1"))).await;

    // Then: Idle with just KeyA captured
    assert_eq!(engine.mode().await, Mode::Idle);
    let log = engine.log().await;
    assert_eq!(log.len(), 2);
    assert!(matches!(
        &log.events[0],
        InputEvent::KeyPress { key, .. } if key == &KeyCode::from("KeyA")
    ));
    assert!(matches!(
        &log.events[1],
        InputEvent::KeyRelease { key, .. } if key == &KeyCode::from("KeyA")
    ));
}

/// WHAT: OS auto-repeat of a held hotkey does not re-toggle
/// WHY: Holding F1 slightly too long must not stop the recording it started
#[tokio::test]
async fn given_held_hotkey_when_repeated_then_applied_once() {
    // Given: A dispatcher
    let (engine, _injector) = engine_with(Settings::default());
    let mut dispatcher = HotkeyDispatcher::new(engine.clone());

    // When: F1 down three times before it comes up
    for _ in 0..3 {
        dispatcher.dispatch(RawInput::now(key_down("F1"))).await;
    }

    // Then: Recording started once
    assert_eq!(engine.mode().await, Mode::Recording);
}

/// WHAT: A hotkey request the current mode rejects is silently dropped
/// WHY: Hotkey callers have nowhere to report an error
#[tokio::test]
async fn given_recording_when_spam_hotkey_pressed_then_dropped() {
    // Given: A recording engine
    let (engine, injector) = engine_with(Settings::default());
    let mut dispatcher = HotkeyDispatcher::new(engine.clone());
    dispatcher.dispatch(RawInput::now(key_down("F1"))).await;

    // When: The spam hotkey (F3) is pressed
    dispatcher.dispatch(RawInput::now(key_down("F3"))).await;
    dispatcher.dispatch(RawInput::now(key_up("F3"))).await;

    // Then: Still recording, nothing clicked, F3 not captured
    assert_eq!(engine.mode().await, Mode::Recording);
    assert_eq!(injector.count(), 0);
    assert_eq!(engine.event_count().await, 0);
}

/// WHAT: Rebinding on the engine moves the dispatcher's trigger key
/// WHY: Keys can be rebound at runtime
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_rebound_record_key_when_pressed_then_recording_starts() {
    // Given: Record rebound to F6
    let (engine, _injector) = engine_with(Settings::default());
    let mut dispatcher = HotkeyDispatcher::new(engine.clone());
    engine
        .rebind_hotkey(HotkeyAction::Record, KeyCode::from("F6"))
        .await
        .unwrap();

    // When: The old key, then the new key
    dispatcher.dispatch(RawInput::now(key_down("F1"))).await;
    let after_old = engine.mode().await;
    dispatcher.dispatch(RawInput::now(key_down("F6"))).await;

    // Then: Only F6 starts recording
    assert_eq!(after_old, Mode::Idle);
    assert_eq!(engine.mode().await, Mode::Recording);
}

/// WHAT: The run loop drains the input channel and stops on shutdown
/// WHY: The binary feeds the dispatcher exclusively through this loop
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_running_dispatcher_when_input_sent_then_engine_reacts_and_shutdown_ends_loop() {
    // Given: A dispatcher task
    let (engine, _injector) = engine_with(Settings::default());
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(HotkeyDispatcher::new(engine.clone()).run(input_rx, shutdown_rx));

    // When: Starting a recording and clicking through the channel
    input_tx.send(RawInput::now(key_down("F1"))).unwrap();
    input_tx.send(RawInput::now(mouse_down(10, 20))).unwrap();
    assert!(wait_for_mode(&engine, Mode::Recording, Duration::from_secs(2)).await);
    for _ in 0..200 {
        if engine.event_count().await == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    // Then: Shutdown ends the loop cleanly
    shutdown_tx.send(true).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(engine.event_count().await, 1);
}
