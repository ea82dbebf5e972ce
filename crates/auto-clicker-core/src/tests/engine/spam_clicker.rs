use crate::{
    Mode, MouseButton, SPAM_CLICK_INTERVAL, Settings,
    tests::support::{Injected, engine_with, wait_for_calls},
};

use std::time::Duration;

/// WHAT: Spam clicking produces left clicks at roughly 100 per second
/// WHY: The fixed 10 ms period is the feature's contract
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[allow(clippy::unwrap_used)]
async fn given_spam_running_when_sampled_then_left_clicks_at_fixed_rate() {
    // Given: Spam clicking for 300 ms
    let (engine, injector) = engine_with(Settings::default());
    engine.start_spam().await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    // When: Stopping
    engine.stop_spam().await.unwrap();

    // Then: Around 30 clicks, all primary at the cursor
    let calls = injector.calls();
    assert_eq!(SPAM_CLICK_INTERVAL, Duration::from_millis(10));
    assert!(
        calls.len() >= 10 && calls.len() <= 40,
        "{} clicks",
        calls.len()
    );
    assert!(
        calls
            .iter()
            .all(|c| *c == Injected::ClickAtCursor(MouseButton::Left))
    );
}

/// WHAT: No click happens after stop returns
/// WHY: Stop must be observed within one tick
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[allow(clippy::unwrap_used)]
async fn given_spam_running_when_stopped_then_no_further_clicks() {
    // Given: Spam clicking that has clicked at least once
    let (engine, injector) = engine_with(Settings::default());
    engine.start_spam().await.unwrap();
    assert!(wait_for_calls(&injector, 1, Duration::from_secs(2)).await);

    // When: Stopping
    engine.stop_spam().await.unwrap();
    let after_stop = injector.count();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Then: Count is frozen and the engine idle
    assert_eq!(injector.count(), after_stop);
    assert_eq!(engine.mode().await, Mode::Idle);
}

/// WHAT: Stop-spam is only valid while spam clicking
/// WHY: Each activity is stopped by its own request
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recording_when_stopping_spam_then_rejected() {
    // Given: A recording engine
    let (engine, _injector) = engine_with(Settings::default());
    engine.start_recording().await.unwrap();

    // When: Stopping spam
    let result = engine.stop_spam().await;

    // Then: Rejected, still recording
    assert!(result.is_err());
    assert_eq!(engine.mode().await, Mode::Recording);
}
