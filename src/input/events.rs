//! Generic input event types for cross-host compatibility.

use serde::{Deserialize, Serialize};

/// Generic key representation.
///
/// Hosts map their native key codes to these values. Only the keys the text
/// field and shortcut matching care about are distinguished. On the wire a key
/// is its name: a single character, or `Escape`, `Return`, `Backspace`, `Tab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols, space)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Parses a key name (case-insensitive for named keys).
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }

        match name.to_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "tab" => Key::Tab,
            "space" => Key::Char(' '),
            _ => Key::Unknown,
        }
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::from_name(&name)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => c.to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Return => "Return".to_string(),
            Key::Backspace => "Backspace".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Unknown => "Unknown".to_string(),
        }
    }
}

/// Pointer button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MouseButton {
    /// Primary button (the only one that draws)
    #[default]
    Left,
    Right,
    Middle,
}
