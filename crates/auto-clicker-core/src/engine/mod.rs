mod activity;
mod controller;
mod hotkey_dispatcher;
mod mode;
mod player;
pub(crate) mod recorder;
mod spam_clicker;
mod status;

pub use {
    controller::Engine,
    hotkey_dispatcher::HotkeyDispatcher,
    mode::{Mode, ModeRequest},
    spam_clicker::SPAM_CLICK_INTERVAL,
    status::StatusUpdate,
};
