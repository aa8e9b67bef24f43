//! Keyboard modifier state carried with key presses.

use serde::{Deserialize, Serialize};

/// Keyboard modifier state.
///
/// Hosts report which modifiers were held when a key was pressed; shortcut
/// matching compares all three exactly, so `Ctrl+Z` and `Ctrl+Shift+Z` stay
/// distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// All modifiers released.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const fn new(ctrl: bool, shift: bool, alt: bool) -> Self {
        Self { shift, ctrl, alt }
    }

    pub const fn ctrl() -> Self {
        Self::new(true, false, false)
    }

    pub const fn ctrl_shift() -> Self {
        Self::new(true, true, false)
    }

    /// Whether any modifier that turns a key into a shortcut is held.
    ///
    /// Shift alone still types (uppercase letters), so it does not count.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.alt
    }
}
