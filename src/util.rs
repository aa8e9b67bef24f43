//! Utility functions for geometry and color names.
//!
//! This module provides:
//! - The [`Point`] type used for all surface coordinates
//! - Arrowhead geometry calculations
//! - Rectangle normalisation and ellipse bounds
//! - Name-to-color mapping for configuration files

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A position on the surface in pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Smallest arrowhead length in pixels, regardless of stroke width.
pub const MIN_ARROW_HEAD_LENGTH: f64 = 15.0;

/// Angle between each arrowhead back edge and the shaft.
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

/// Arrowhead length for a stroke width: `max(15, width * 5)`.
pub fn arrow_head_length(stroke_width: f64) -> f64 {
    MIN_ARROW_HEAD_LENGTH.max(stroke_width * 5.0)
}

/// Points defining an arrow drawn from `start` towards `tip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    /// Where the shaft stops, at the base of the head
    pub shaft_end: Point,
    /// Head tip (the drag end point)
    pub tip: Point,
    /// Back corner rotated -30° from the shaft direction
    pub left: Point,
    /// Back corner rotated +30° from the shaft direction
    pub right: Point,
}

/// Calculates the shaft end and the triangular head of an arrow.
///
/// The shaft is shortened by `head_length` along its direction so the head
/// covers the final segment. The two back corners sit `head_length` away from
/// the tip, rotated ±30° from the shaft direction. A zero-length drag points
/// along +x (the direction `atan2(0, 0)` yields).
pub fn arrow_geometry(start: Point, end: Point, head_length: f64) -> ArrowGeometry {
    let angle = (end.y - start.y).atan2(end.x - start.x);

    let back = |theta: f64| Point {
        x: end.x - head_length * theta.cos(),
        y: end.y - head_length * theta.sin(),
    };

    ArrowGeometry {
        shaft_end: back(angle),
        tip: end,
        left: back(angle - ARROW_HEAD_ANGLE),
        right: back(angle + ARROW_HEAD_ANGLE),
    }
}

// ============================================================================
// Rectangle / Ellipse Geometry
// ============================================================================

/// Normalises a corner-to-corner drag into `(x, y, width, height)` with
/// non-negative extents, so any drag direction yields the same box.
pub fn normalized_rect(start: Point, end: Point) -> (f64, f64, f64, f64) {
    let x = start.x.min(end.x);
    let y = start.y.min(end.y);
    (x, y, (end.x - start.x).abs(), (end.y - start.y).abs())
}

/// Calculates ellipse parameters from two corner points.
///
/// # Returns
/// Tuple `(cx, cy, rx, ry)` where:
/// - `cx`, `cy` = midpoint of the two corners
/// - `rx` = half the absolute horizontal span
/// - `ry` = half the absolute vertical span
pub fn ellipse_bounds(start: Point, end: Point) -> (f64, f64, f64, f64) {
    let cx = (start.x + end.x) / 2.0;
    let cy = (start.y + end.y) / 2.0;
    let rx = (end.x - start.x).abs() / 2.0;
    let ry = (end.y - start.y).abs() / 2.0;
    (cx, cy, rx, ry)
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}
