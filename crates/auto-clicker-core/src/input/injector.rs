use crate::{CoreResult, KeyCode, MouseButton};

/// Synchronous input-injection capability.
///
/// Every call completes the simulated action before returning. Calls are
/// made from the blocking thread pool, never from an async worker.
pub trait InputInjector: Send + Sync {
    /// Move the cursor to `(x, y)` and click `button`.
    fn click(&self, button: MouseButton, x: i32, y: i32) -> CoreResult<()>;

    /// Click `button` wherever the cursor currently is.
    fn click_at_cursor(&self, button: MouseButton) -> CoreResult<()>;

    /// Press `key` down.
    fn key_down(&self, key: &KeyCode) -> CoreResult<()>;

    /// Release `key`.
    fn key_up(&self, key: &KeyCode) -> CoreResult<()>;
}
