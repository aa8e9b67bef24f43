//! Control messages, keyboard input and shortcut actions.

use super::{DrawingState, Engine};
use crate::config::{Action, keybindings};
use crate::control::{ControlMessage, InputEvent};
use crate::draw::Color;
use crate::input::{Key, Modifiers, Tool};
use crate::util::Point;
use std::time::Instant;

impl Engine {
    /// Applies a message from the control channel.
    pub fn apply_control(&mut self, message: &ControlMessage) {
        log::debug!("Control message: {:?}", message);
        match message {
            ControlMessage::ToolChanged { tool } => self.set_tool(*tool),
            ControlMessage::ColorChanged { color } => self.set_color(color),
            ControlMessage::StrokeWidthChanged { width } => self.set_stroke_width(*width),
            ControlMessage::ClearCanvas => self.clear(),
            ControlMessage::Undo => self.undo(),
            ControlMessage::Redo => self.redo(),
            ControlMessage::DrawingModeChanged { enabled } => self.set_drawing_enabled(*enabled),
        }
    }

    /// Applies a raw input event from the host, stamped with the current time.
    pub fn apply_input(&mut self, event: &InputEvent) {
        self.apply_input_at(event, Instant::now());
    }

    /// Applies a raw input event at an explicit instant.
    pub fn apply_input_at(&mut self, event: &InputEvent, now: Instant) {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                self.on_pointer_down_at(button, Point::new(x, y), now)
            }
            InputEvent::PointerMove { x, y } => self.on_pointer_move(Point::new(x, y)),
            InputEvent::PointerUp { x, y, button } => self.on_pointer_up(button, Point::new(x, y)),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::TouchStart { x, y } => self.on_touch_start_at(Point::new(x, y), now),
            InputEvent::TouchMove { x, y } => self.on_touch_move(Point::new(x, y)),
            InputEvent::TouchEnd => self.on_touch_end(),
            InputEvent::TouchCancel => self.on_touch_cancel(),
            InputEvent::KeyPress { key, modifiers } => self.on_key_press(key, modifiers),
            InputEvent::FocusLost => self.on_focus_lost_at(now),
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Selects a tool, or deselects with `None`.
    ///
    /// Leaving a text tool commits the pending field first. An in-progress
    /// gesture is abandoned. Selecting any tool enables drawing, and any tool
    /// other than the pointer hides the laser dot.
    pub fn set_tool(&mut self, tool: Option<Tool>) {
        if self.pending_text.is_some() && tool != self.tool {
            self.commit_text();
        }
        self.abandon_gesture();

        self.tool = tool;
        if tool.is_some() && !self.drawing_enabled {
            log::debug!("Tool selection enables drawing");
            self.drawing_enabled = true;
        }
        if tool != Some(Tool::Pointer) && self.laser.hide() {
            self.needs_redraw = true;
        }

        log::info!("Tool: {}", tool.map_or("none", |selected| selected.as_str()));
    }

    /// Sets the drawing color from a `#rrggbb` string.
    ///
    /// Unparseable values fall back to the configured default color.
    pub fn set_color(&mut self, color: &str) {
        self.color = match color.parse::<Color>() {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!(
                    "Invalid color {:?} ({}), using default {}",
                    color,
                    err,
                    self.settings.default_color
                );
                self.settings.default_color
            }
        };
    }

    /// Sets the stroke width, rounded and clamped to at least 1 pixel.
    pub fn set_stroke_width(&mut self, width: f64) {
        let clamped = if width.is_finite() && width >= 1.0 {
            width.round().min(u32::MAX as f64) as u32
        } else {
            log::warn!("Invalid stroke width {}, clamping to 1", width);
            1
        };
        self.stroke_width = clamped;
    }

    /// Enables or disables drawing.
    ///
    /// Disabling discards the pending text field, hides the laser dot and
    /// abandons an in-progress gesture.
    pub fn set_drawing_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.cancel_text();
            self.abandon_gesture();
            if self.laser.hide() {
                self.needs_redraw = true;
            }
        }
        if self.drawing_enabled != enabled {
            log::info!("Drawing {}", if enabled { "enabled" } else { "disabled" });
        }
        self.drawing_enabled = enabled;
    }

    /// Steps back one snapshot; stepping back from the first clears the surface.
    pub fn undo(&mut self) {
        self.abandon_gesture();
        if self.history.undo() {
            self.repaint_from_history();
        } else {
            log::debug!("Nothing to undo");
        }
    }

    /// Steps forward one snapshot if one exists.
    pub fn redo(&mut self) {
        self.abandon_gesture();
        if self.history.redo() {
            self.repaint_from_history();
        } else {
            log::debug!("Nothing to redo");
        }
    }

    /// Wipes the surface and records the blank state, so the wipe is undoable.
    pub fn clear(&mut self) {
        self.cancel_text();
        self.state = DrawingState::Idle;
        self.laser.hide();
        self.surface.clear();
        self.commit_snapshot();
        log::info!("Canvas cleared");
    }

    /// Runs a shortcut action.
    ///
    /// Each action is translated into the control message the toolbar would
    /// have sent. Undo and redo are dropped while drawing is disabled.
    pub fn apply_action(&mut self, action: Action) {
        let message = match action {
            Action::ToggleDrawing => ControlMessage::DrawingModeChanged {
                enabled: !self.drawing_enabled,
            },
            Action::ClearCanvas => ControlMessage::ClearCanvas,
            Action::Undo | Action::Redo if !self.drawing_enabled => {
                log::debug!("Ignoring {:?}: drawing disabled", action);
                return;
            }
            Action::Undo => ControlMessage::Undo,
            Action::Redo => ControlMessage::Redo,
            Action::SelectPen
            | Action::SelectRectangle
            | Action::SelectEllipse
            | Action::SelectArrow
            | Action::SelectLine
            | Action::SelectPointer
            | Action::SelectEraser => ControlMessage::ToolChanged {
                tool: action.tool(),
            },
        };
        self.apply_control(&message);
    }

    /// Processes a key press.
    ///
    /// While a text field is open, plain keys (no Ctrl/Alt) edit it. Otherwise
    /// the key is matched against the configured shortcuts.
    pub fn on_key_press(&mut self, key: Key, modifiers: Modifiers) {
        if !modifiers.is_command() && self.handle_text_key(key) {
            return;
        }

        match keybindings::find_action(&self.action_map, key, modifiers) {
            Some(action) => {
                log::debug!("Key {:?} {:?} -> {:?}", key, modifiers, action);
                self.apply_action(action);
            }
            None => log::debug!("Unbound key {:?} {:?}", key, modifiers),
        }
    }
}
