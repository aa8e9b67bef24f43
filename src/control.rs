//! Control-channel messages, input events, and headless replay scripts.
//!
//! Both message families are JSON objects tagged by a kebab-case `type`
//! field:
//!
//! ```json
//! {"type": "tool-changed", "tool": "pen"}
//! {"type": "color-changed", "color": "#00ff00"}
//! {"type": "pointer-down", "x": 10, "y": 20}
//! ```
//!
//! A replay script is newline-delimited JSON mixing both families plus
//! `{"type": "wait", "ms": 200}` records that advance a virtual clock.

use crate::engine::Engine;
use crate::input::{Key, Modifiers, MouseButton, Tool, tool};
use crate::util::Point;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io::BufRead;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Selection and command messages sent by the toolbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlMessage {
    /// Select a tool; `none`, an empty string or `null` deselects
    ToolChanged {
        #[serde(default, deserialize_with = "deserialize_tool_selection")]
        tool: Option<Tool>,
    },
    /// Change the drawing color (`#rrggbb`)
    ColorChanged { color: String },
    /// Change the stroke width in pixels
    StrokeWidthChanged { width: f64 },
    ClearCanvas,
    Undo,
    Redo,
    /// Enable or disable drawing (click-through when disabled)
    DrawingModeChanged { enabled: bool },
}

fn deserialize_tool_selection<'de, D>(deserializer: D) -> Result<Option<Tool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(name) => tool::parse_selection(&name).map_err(serde::de::Error::custom),
    }
}

/// Raw input delivered by the host window to the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    PointerLeave,
    TouchStart {
        x: f64,
        y: f64,
    },
    TouchMove {
        x: f64,
        y: f64,
    },
    TouchEnd,
    TouchCancel,
    KeyPress {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// The pending text field lost keyboard focus
    FocusLost,
    /// The host viewport changed size
    Resize {
        width: i32,
        height: i32,
    },
}

/// Script-only records that steer the replay itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Directive {
    /// Advance the replay clock by `ms` milliseconds
    Wait { ms: u64 },
}

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptRecord {
    Control(ControlMessage),
    Input(InputEvent),
    Directive(Directive),
}

/// Errors that can occur while reading a replay script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: not a control message, input event or wait record: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses a single script line. Returns `Ok(None)` for blank lines and `#`
/// comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptRecord>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Parses a whole script, reporting the 1-based line of the first bad record.
pub fn parse_script<R: BufRead>(reader: R) -> Result<Vec<ScriptRecord>, ScriptError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let parsed = parse_line(&line).map_err(|source| ScriptError::Parse {
            line: index + 1,
            source,
        })?;
        records.extend(parsed);
    }
    Ok(records)
}

/// Engine state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub records: usize,
    pub tool: Option<Tool>,
    pub drawing_enabled: bool,
    pub history_len: usize,
    pub history_cursor: Option<usize>,
    pub painted_pixels: usize,
}

impl ReplaySummary {
    pub fn of(engine: &Engine, records: usize) -> Self {
        Self {
            records,
            tool: engine.tool(),
            drawing_enabled: engine.is_drawing_enabled(),
            history_len: engine.history_len(),
            history_cursor: engine.history_cursor(),
            painted_pixels: engine.surface().painted_pixel_count(),
        }
    }
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tool = self.tool.map_or("none", |tool| tool.as_str());
        let cursor = self
            .history_cursor
            .map_or_else(|| "-1".to_string(), |index| index.to_string());
        writeln!(f, "records:         {}", self.records)?;
        writeln!(f, "tool:            {}", tool)?;
        writeln!(f, "drawing enabled: {}", self.drawing_enabled)?;
        writeln!(f, "history:         {} (cursor {})", self.history_len, cursor)?;
        write!(f, "painted pixels:  {}", self.painted_pixels)
    }
}

/// Applies parsed records to `engine` in order.
///
/// Time starts at `start` and only moves on `wait` records, so settle-delay
/// behaviour is reproducible.
pub fn replay(engine: &mut Engine, records: &[ScriptRecord], start: Instant) -> ReplaySummary {
    let mut now = start;
    for record in records {
        match record {
            ScriptRecord::Control(message) => engine.apply_control(message),
            ScriptRecord::Input(event) => engine.apply_input_at(event, now),
            ScriptRecord::Directive(Directive::Wait { ms }) => {
                now += Duration::from_millis(*ms)
            }
        }
    }
    ReplaySummary::of(engine, records.len())
}

impl InputEvent {
    /// Position carried by the event, if any.
    pub fn point(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerMove { x, y }
            | InputEvent::PointerUp { x, y, .. }
            | InputEvent::TouchStart { x, y }
            | InputEvent::TouchMove { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}
