//! Drawing tool selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines what a pointer gesture produces. "No tool" is
/// not a variant; the engine holds an `Option<Tool>` and `None` means input
/// is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Freehand ink following the pointer path
    Pen,
    /// Freehand stroke that removes ink (destination-out)
    Eraser,
    /// Rectangle outline from corner to corner
    Rectangle,
    /// Ellipse outline inscribed in the drag box
    #[serde(alias = "circle")]
    Ellipse,
    /// Straight line between start and end points
    Line,
    /// Line with a filled head at the end point
    Arrow,
    /// Laser-pointer dot, never leaves marks
    Pointer,
    /// Plain text in the current color
    #[serde(alias = "text")]
    TextStandard,
    /// Text on a rounded background in the current color
    #[serde(alias = "highlight")]
    TextHighlight,
}

/// Cursor shape the host should display over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorHint {
    Default,
    Crosshair,
    Pointer,
    Eraser,
    Text,
}

impl Tool {
    /// Every selectable tool, in toolbar order.
    pub const ALL: [Tool; 9] = [
        Tool::Pen,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Line,
        Tool::Arrow,
        Tool::Pointer,
        Tool::TextStandard,
        Tool::TextHighlight,
    ];

    /// Canonical wire name (kebab-case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Rectangle => "rectangle",
            Tool::Ellipse => "ellipse",
            Tool::Line => "line",
            Tool::Arrow => "arrow",
            Tool::Pointer => "pointer",
            Tool::TextStandard => "text-standard",
            Tool::TextHighlight => "text-highlight",
        }
    }

    /// Pen and eraser stroke incrementally onto the surface.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Tool::Pen | Tool::Eraser)
    }

    /// Two-point shapes that are previewed while dragging.
    pub fn is_bounded(&self) -> bool {
        matches!(
            self,
            Tool::Rectangle | Tool::Ellipse | Tool::Line | Tool::Arrow
        )
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Tool::TextStandard | Tool::TextHighlight)
    }

    pub fn cursor_hint(&self) -> CursorHint {
        match self {
            Tool::Pen | Tool::Rectangle | Tool::Ellipse | Tool::Line | Tool::Arrow => {
                CursorHint::Crosshair
            }
            Tool::Eraser => CursorHint::Eraser,
            Tool::Pointer => CursorHint::Pointer,
            Tool::TextStandard | Tool::TextHighlight => CursorHint::Text,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pen" => Ok(Tool::Pen),
            "eraser" => Ok(Tool::Eraser),
            "rectangle" => Ok(Tool::Rectangle),
            "ellipse" | "circle" => Ok(Tool::Ellipse),
            "line" => Ok(Tool::Line),
            "arrow" => Ok(Tool::Arrow),
            "pointer" => Ok(Tool::Pointer),
            "text-standard" | "text" => Ok(Tool::TextStandard),
            "text-highlight" | "highlight" => Ok(Tool::TextHighlight),
            other => Err(format!("Unknown tool: {other}")),
        }
    }
}

/// Parses a tool selection where `none` (or an empty string) deselects.
pub fn parse_selection(s: &str) -> Result<Option<Tool>, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}
