mod hotkey_dispatcher;
mod mode;
mod spam_clicker;
