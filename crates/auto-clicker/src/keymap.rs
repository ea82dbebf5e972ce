//! Translation between platform key/button types and engine key names.
//!
//! Key names are the listener's variant names (`"KeyA"`, `"F1"`,
//! `"ShiftLeft"`, `"Unknown(65)"`), so a recorded name maps back to the same
//! physical key on replay.

use auto_clicker_core::{KeyCode, MouseButton};

/// Engine name of a key reported by the listener.
pub(crate) fn key_code(key: rdev::Key) -> KeyCode {
    KeyCode::new(format!("{:?}", key))
}

/// Engine button for a listener button. Extra buttons are not tracked.
pub(crate) fn mouse_button(button: rdev::Button) -> Option<MouseButton> {
    match button {
        rdev::Button::Left => Some(MouseButton::Left),
        rdev::Button::Right => Some(MouseButton::Right),
        rdev::Button::Middle => Some(MouseButton::Middle),
        rdev::Button::Unknown(_) => None,
    }
}

/// Injector button for an engine button.
pub(crate) fn enigo_button(button: MouseButton) -> enigo::Button {
    match button {
        MouseButton::Left => enigo::Button::Left,
        MouseButton::Right => enigo::Button::Right,
        MouseButton::Middle => enigo::Button::Middle,
    }
}

/// Injector key for an engine key name, if it can be simulated.
pub(crate) fn enigo_key(key: &KeyCode) -> Option<enigo::Key> {
    use enigo::Key;

    let name = key.as_str();

    if let Some(letter) = name.strip_prefix("Key")
        && let Some(c) = single_char(letter)
        && c.is_ascii_uppercase()
    {
        return Some(Key::Unicode(c.to_ascii_lowercase()));
    }

    if let Some(digit) = name.strip_prefix("Num").or_else(|| name.strip_prefix("Kp"))
        && let Some(c) = single_char(digit)
        && c.is_ascii_digit()
    {
        return Some(Key::Unicode(c));
    }

    let key = match name {
        "Alt" | "AltGr" => Key::Alt,
        "Backspace" => Key::Backspace,
        "CapsLock" => Key::CapsLock,
        "ControlLeft" | "ControlRight" => Key::Control,
        "Delete" | "KpDelete" => Key::Delete,
        "DownArrow" => Key::DownArrow,
        "End" => Key::End,
        "Escape" => Key::Escape,
        "F1" => Key::F1,
        "F2" => Key::F2,
        "F3" => Key::F3,
        "F4" => Key::F4,
        "F5" => Key::F5,
        "F6" => Key::F6,
        "F7" => Key::F7,
        "F8" => Key::F8,
        "F9" => Key::F9,
        "F10" => Key::F10,
        "F11" => Key::F11,
        "F12" => Key::F12,
        "Home" => Key::Home,
        "LeftArrow" => Key::LeftArrow,
        "MetaLeft" | "MetaRight" => Key::Meta,
        "PageDown" => Key::PageDown,
        "PageUp" => Key::PageUp,
        "Return" | "KpReturn" => Key::Return,
        "RightArrow" => Key::RightArrow,
        "ShiftLeft" | "ShiftRight" => Key::Shift,
        "Space" => Key::Space,
        "Tab" => Key::Tab,
        "UpArrow" => Key::UpArrow,
        "Minus" | "KpMinus" => Key::Unicode('-'),
        "Equal" => Key::Unicode('='),
        "KpPlus" => Key::Unicode('+'),
        "KpMultiply" => Key::Unicode('*'),
        "KpDivide" | "Slash" => Key::Unicode('/'),
        "LeftBracket" => Key::Unicode('['),
        "RightBracket" => Key::Unicode(']'),
        "SemiColon" => Key::Unicode(';'),
        "Quote" => Key::Unicode('\''),
        "BackQuote" => Key::Unicode('`'),
        "BackSlash" | "IntlBackslash" => Key::Unicode('\\'),
        "Comma" => Key::Unicode(','),
        "Dot" => Key::Unicode('.'),
        other => Key::Unicode(single_char(other)?),
    };

    Some(key)
}

/// Canonical key name for console input.
///
/// Accepts the canonical names as well as a few shorthands: single letters
/// and digits (`a` is `KeyA`, `5` is `Num5`), function keys in any case
/// (`f5`) and `esc`.
pub(crate) fn parse_key_name(input: &str) -> KeyCode {
    let input = input.trim();

    if let Some(c) = single_char(input) {
        if c.is_ascii_alphabetic() {
            return KeyCode::new(format!("Key{}", c.to_ascii_uppercase()));
        }
        if c.is_ascii_digit() {
            return KeyCode::new(format!("Num{}", c));
        }
    }

    let lower = input.to_ascii_lowercase();
    if let Some(n) = lower.strip_prefix('f')
        && !n.is_empty()
        && n.chars().all(|c| c.is_ascii_digit())
    {
        return KeyCode::new(format!("F{}", n));
    }

    match lower.as_str() {
        "esc" | "escape" => KeyCode::from("Escape"),
        "space" => KeyCode::from("Space"),
        "tab" => KeyCode::from("Tab"),
        "enter" | "return" => KeyCode::from("Return"),
        _ => KeyCode::from(input),
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
