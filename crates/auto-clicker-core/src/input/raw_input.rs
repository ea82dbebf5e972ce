use crate::{KeyCode, MouseButton};

use std::time::Instant;

/// What the input hook observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInputKind {
    /// A key went down.
    KeyDown(KeyCode),
    /// A key came up.
    KeyUp(KeyCode),
    /// A mouse button went down at the cursor position.
    MouseDown {
        /// Button pressed.
        button: MouseButton,
        /// Cursor x.
        x: i32,
        /// Cursor y.
        y: i32,
    },
    /// A mouse button came up at the cursor position.
    MouseUp {
        /// Button released.
        button: MouseButton,
        /// Cursor x.
        x: i32,
        /// Cursor y.
        y: i32,
    },
}

/// Notification pushed by the input hook, stamped with its monotonic
/// arrival time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    /// What happened.
    pub kind: RawInputKind,
    /// When the hook saw it.
    pub at: Instant,
}

impl RawInput {
    /// Stamp `kind` with the current instant.
    pub fn now(kind: RawInputKind) -> Self {
        Self {
            kind,
            at: Instant::now(),
        }
    }

    /// Key carried by a key notification.
    pub fn key(&self) -> Option<&KeyCode> {
        match &self.kind {
            RawInputKind::KeyDown(key) | RawInputKind::KeyUp(key) => Some(key),
            RawInputKind::MouseDown { .. } | RawInputKind::MouseUp { .. } => None,
        }
    }
}
