//! Shape definitions for two-point annotations and the stroke style they carry.

use super::color::Color;
use crate::input::Tool;
use crate::util::{self, Point};

/// Eraser strokes are this many times wider than the nominal stroke width.
pub const ERASER_WIDTH_FACTOR: f64 = 5.0;

/// Smallest font size (in pixels) for text annotations.
pub const MIN_FONT_SIZE: f64 = 16.0;

/// Font size grows by this factor per unit of stroke width.
pub const FONT_SIZE_FACTOR: f64 = 6.0;

/// Style value captured when a gesture starts and passed to every render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke and fill color
    pub color: Color,
    /// Nominal stroke width in pixels (always at least 1)
    pub width: u32,
}

impl StrokeStyle {
    pub fn new(color: Color, width: u32) -> Self {
        Self {
            color,
            width: width.max(1),
        }
    }

    /// Line width for pens and outlined shapes.
    pub fn line_width(&self) -> f64 {
        self.width as f64
    }

    /// Line width used by the eraser.
    pub fn eraser_width(&self) -> f64 {
        self.width as f64 * ERASER_WIDTH_FACTOR
    }

    /// Arrowhead length: `max(15, width * 5)`.
    pub fn arrow_head_length(&self) -> f64 {
        util::arrow_head_length(self.width as f64)
    }

    /// Font size for text annotations: `max(16, width * 6)`.
    pub fn font_size(&self) -> f64 {
        MIN_FONT_SIZE.max(self.width as f64 * FONT_SIZE_FACTOR)
    }
}

/// A shape defined by the two points of a drag, drawn as a preview while the
/// pointer moves and committed on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned outline spanning both corners
    Rect { start: Point, end: Point },
    /// Outline inscribed in the box spanning both corners
    Ellipse { start: Point, end: Point },
    /// Straight segment from start to end
    Line { start: Point, end: Point },
    /// Shaft from start plus a filled head at end
    Arrow { start: Point, end: Point },
}

impl Shape {
    /// Builds the shape for a bounded tool, or `None` for tools that do not
    /// draw a two-point shape (freehand, pointer, text).
    pub fn for_tool(tool: Tool, start: Point, end: Point) -> Option<Self> {
        match tool {
            Tool::Rectangle => Some(Shape::Rect { start, end }),
            Tool::Ellipse => Some(Shape::Ellipse { start, end }),
            Tool::Line => Some(Shape::Line { start, end }),
            Tool::Arrow => Some(Shape::Arrow { start, end }),
            Tool::Pen
            | Tool::Eraser
            | Tool::Pointer
            | Tool::TextStandard
            | Tool::TextHighlight => None,
        }
    }
}
