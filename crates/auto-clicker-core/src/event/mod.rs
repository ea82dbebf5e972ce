mod event_log;
mod input_event;
mod settings;

pub use {
    event_log::EventLog,
    input_event::{InputEvent, KeyCode, MouseButton},
    settings::{
        HotkeyAction, Hotkeys, MAX_LOOP_COUNT, MAX_LOOP_DELAY_MS, MAX_SPEED_MULTIPLIER,
        MIN_SPEED_MULTIPLIER, Settings,
    },
};
