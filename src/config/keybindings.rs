//! Keybinding configuration types and parsing.
//!
//! Shortcuts are matched against key presses the host forwards to the engine.
//! Registering them as global OS shortcuts is the host's job.

use crate::input::{Key, Modifiers, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Tool selection (each one also enables drawing)
    SelectPen,
    SelectRectangle,
    SelectEllipse,
    SelectArrow,
    SelectLine,
    SelectPointer,
    SelectEraser,

    // Mode and canvas
    ToggleDrawing,
    ClearCanvas,

    // History (ignored while drawing is disabled)
    Undo,
    Redo,
}

impl Action {
    /// Tool chosen by a selection action.
    pub fn tool(&self) -> Option<Tool> {
        match self {
            Action::SelectPen => Some(Tool::Pen),
            Action::SelectRectangle => Some(Tool::Rectangle),
            Action::SelectEllipse => Some(Tool::Ellipse),
            Action::SelectArrow => Some(Tool::Arrow),
            Action::SelectLine => Some(Tool::Line),
            Action::SelectPointer => Some(Tool::Pointer),
            Action::SelectEraser => Some(Tool::Eraser),
            Action::ToggleDrawing | Action::ClearCanvas | Action::Undo | Action::Redo => None,
        }
    }
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+P" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    /// Key names are stored lowercased so differently-cased duplicates collide.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into trailing empty parts; the key itself is '+'
        let joined = key_parts.join("+");
        let key = if joined.is_empty() {
            "+".to_string()
        } else {
            joined.to_lowercase()
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches a key name and modifier state.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.ctrl
            && self.shift == modifiers.shift
            && self.alt == modifiers.alt
    }
}

/// Name used to match a [`Key`] against bindings, if the key can be bound.
pub fn key_name(key: Key) -> Option<String> {
    match key {
        Key::Char(' ') => Some("space".to_string()),
        Key::Char(c) => Some(c.to_lowercase().to_string()),
        Key::Escape => Some("escape".to_string()),
        Key::Return => Some("return".to_string()),
        Key::Backspace => Some("backspace".to_string()),
        Key::Tab => Some("tab".to_string()),
        Key::Unknown => None,
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// select_pen = ["Ctrl+Shift+P"]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Shift+Z", "Ctrl+Y"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_select_pen")]
    pub select_pen: Vec<String>,

    #[serde(default = "default_select_rectangle")]
    pub select_rectangle: Vec<String>,

    #[serde(default = "default_select_ellipse")]
    pub select_ellipse: Vec<String>,

    #[serde(default = "default_select_arrow")]
    pub select_arrow: Vec<String>,

    #[serde(default = "default_select_line")]
    pub select_line: Vec<String>,

    #[serde(default = "default_select_pointer")]
    pub select_pointer: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,

    #[serde(default = "default_toggle_drawing")]
    pub toggle_drawing: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            select_pen: default_select_pen(),
            select_rectangle: default_select_rectangle(),
            select_ellipse: default_select_ellipse(),
            select_arrow: default_select_arrow(),
            select_line: default_select_line(),
            select_pointer: default_select_pointer(),
            select_eraser: default_select_eraser(),
            toggle_drawing: default_toggle_drawing(),
            clear_canvas: default_clear_canvas(),
            undo: default_undo(),
            redo: default_redo(),
        }
    }
}

/// Lookup table from parsed bindings to actions.
pub type ActionMap = HashMap<KeyBinding, Action>;

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<ActionMap, String> {
        let mut map = HashMap::new();

        let groups: [(&Vec<String>, Action); 11] = [
            (&self.select_pen, Action::SelectPen),
            (&self.select_rectangle, Action::SelectRectangle),
            (&self.select_ellipse, Action::SelectEllipse),
            (&self.select_arrow, Action::SelectArrow),
            (&self.select_line, Action::SelectLine),
            (&self.select_pointer, Action::SelectPointer),
            (&self.select_eraser, Action::SelectEraser),
            (&self.toggle_drawing, Action::ToggleDrawing),
            (&self.clear_canvas, Action::ClearCanvas),
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

/// Finds the action bound to `key` with the given modifiers.
pub fn find_action(map: &ActionMap, key: Key, modifiers: Modifiers) -> Option<Action> {
    let name = key_name(key)?;
    map.iter()
        .find(|(binding, _)| binding.matches(&name, modifiers))
        .map(|(_, action)| *action)
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_select_pen() -> Vec<String> {
    vec!["Ctrl+Shift+P".to_string()]
}

fn default_select_rectangle() -> Vec<String> {
    vec!["Ctrl+Shift+R".to_string()]
}

fn default_select_ellipse() -> Vec<String> {
    vec!["Ctrl+Shift+O".to_string()]
}

fn default_select_arrow() -> Vec<String> {
    vec!["Ctrl+Shift+A".to_string()]
}

fn default_select_line() -> Vec<String> {
    vec!["Ctrl+Shift+L".to_string()]
}

fn default_select_pointer() -> Vec<String> {
    vec!["Ctrl+Shift+I".to_string()]
}

fn default_select_eraser() -> Vec<String> {
    vec!["Ctrl+Shift+E".to_string()]
}

fn default_toggle_drawing() -> Vec<String> {
    vec!["Ctrl+Shift+D".to_string()]
}

fn default_clear_canvas() -> Vec<String> {
    vec!["Ctrl+Shift+C".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Shift+Z".to_string()]
}
