//! Auto-clicker Core Library
//!
//! Records mouse clicks and key presses with their timing, replays them at a
//! configurable speed and loop count, and drives a fixed-rate spam clicker.
//! OS input access stays outside this crate: raw input arrives as
//! [`RawInput`] values and synthetic input leaves through an
//! [`InputInjector`].
//!
//! # Example
//!
//! ```no_run
//! use auto_clicker_core::{
//!     CoreResult, Engine, InputInjector, KeyCode, MouseButton, Settings,
//! };
//!
//! use std::sync::Arc;
//!
//! struct Noop;
//!
//! impl InputInjector for Noop {
//!     fn click(&self, _: MouseButton, _: i32, _: i32) -> CoreResult<()> { Ok(()) }
//!     fn click_at_cursor(&self, _: MouseButton) -> CoreResult<()> { Ok(()) }
//!     fn key_down(&self, _: &KeyCode) -> CoreResult<()> { Ok(()) }
//!     fn key_up(&self, _: &KeyCode) -> CoreResult<()> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let engine = Engine::new(Arc::new(Noop), Settings::default())?;
//!
//!     engine.load_recording("macro.aclk").await?;
//!     engine.start_playback().await?;
//!     Ok(())
//! }
//! ```

mod engine;
mod error;
mod event;
mod input;
mod persistence;

pub use {
    engine::{Engine, HotkeyDispatcher, Mode, ModeRequest, SPAM_CLICK_INTERVAL, StatusUpdate},
    error::{CoreError, Result as CoreResult},
    event::{
        EventLog, HotkeyAction, Hotkeys, InputEvent, KeyCode, MAX_LOOP_COUNT, MAX_LOOP_DELAY_MS,
        MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER, MouseButton, Settings,
    },
    input::{InputInjector, RawInput, RawInputKind},
    persistence::{FORMAT_VERSION, load_recording, save_recording, write_atomic},
};
