//! Cairo-based rendering functions for annotation marks.
//!
//! Every function takes the style it draws with as an explicit argument; none
//! of them read engine state.

use super::color::Color;
use super::font::FontDescriptor;
use super::shape::{Shape, StrokeStyle};
use crate::util::{self, Point};
use std::f64::consts::PI;

/// Opacity used for live shape previews while the pointer is still held.
pub const PREVIEW_OPACITY: f64 = 0.5;

/// Renders a two-point shape at full opacity.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `shape` - The shape to render
/// * `style` - Color and stroke width to draw with
pub fn render_shape(ctx: &cairo::Context, shape: &Shape, style: &StrokeStyle) {
    match shape {
        Shape::Rect { start, end } => render_rect(ctx, *start, *end, style),
        Shape::Ellipse { start, end } => render_ellipse(ctx, *start, *end, style),
        Shape::Line { start, end } => render_line(ctx, *start, *end, style),
        Shape::Arrow { start, end } => render_arrow(ctx, *start, *end, style),
    }
}

/// Renders a shape as a translucent preview.
///
/// The shape is drawn into an intermediate group and composited once, so
/// overlapping parts (the arrow shaft under its head) do not double up.
pub fn render_shape_preview(
    ctx: &cairo::Context,
    shape: &Shape,
    style: &StrokeStyle,
    opacity: f64,
) {
    let _ = ctx.save();
    ctx.push_group();
    render_shape(ctx, shape, style);
    if ctx.pop_group_to_source().is_ok() {
        let _ = ctx.paint_with_alpha(opacity.clamp(0.0, 1.0));
    }
    let _ = ctx.restore();
}

/// Strokes one incremental pen segment in the style color.
pub fn render_pen_segment(ctx: &cairo::Context, from: Point, to: Point, style: &StrokeStyle) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Over);
    style.color.with_alpha(1.0).apply(ctx);
    stroke_round(ctx, &[from, to], style.line_width());
    let _ = ctx.restore();
}

/// Removes pixels along one incremental eraser segment.
///
/// Uses destination-out compositing at the widened eraser width; the source
/// color is irrelevant, only its (full) alpha matters.
pub fn render_eraser_segment(ctx: &cairo::Context, from: Point, to: Point, style: &StrokeStyle) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::DestOut);
    ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
    stroke_round(ctx, &[from, to], style.eraser_width());
    let _ = ctx.restore();
}

fn stroke_round(ctx: &cairo::Context, points: &[Point], width: f64) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    let _ = ctx.stroke();
}

/// Render a straight line
fn render_line(ctx: &cairo::Context, start: Point, end: Point, style: &StrokeStyle) {
    let _ = ctx.save();
    style.color.apply(ctx);
    stroke_round(ctx, &[start, end], style.line_width());
    let _ = ctx.restore();
}

/// Render a rectangle outline spanning both corners
fn render_rect(ctx: &cairo::Context, start: Point, end: Point, style: &StrokeStyle) {
    // Normalize so that dragging in any direction strokes the same path
    let (x, y, w, h) = util::normalized_rect(start, end);

    let _ = ctx.save();
    style.color.apply(ctx);
    ctx.set_line_width(style.line_width());
    ctx.set_line_join(cairo::LineJoin::Round);
    ctx.rectangle(x, y, w, h);
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Render an ellipse using Cairo's arc with scaling
fn render_ellipse(ctx: &cairo::Context, start: Point, end: Point, style: &StrokeStyle) {
    let (cx, cy, rx, ry) = util::ellipse_bounds(start, end);
    if rx <= 0.0 && ry <= 0.0 {
        return;
    }

    // A flat ellipse collapses onto its major axis
    if rx <= 0.0 || ry <= 0.0 {
        let axis = [
            Point::new(cx - rx, cy - ry),
            Point::new(cx + rx, cy + ry),
        ];
        let _ = ctx.save();
        style.color.apply(ctx);
        stroke_round(ctx, &axis, style.line_width());
        let _ = ctx.restore();
        return;
    }

    let _ = ctx.save();
    style.color.apply(ctx);
    ctx.set_line_width(style.line_width());

    // Scale only while building the path so the stroke width stays uniform
    let _ = ctx.save();
    ctx.translate(cx, cy);
    ctx.scale(rx, ry);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    let _ = ctx.restore();

    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Render an arrow: a shortened shaft plus a filled triangular head at `end`
fn render_arrow(ctx: &cairo::Context, start: Point, end: Point, style: &StrokeStyle) {
    let geom = util::arrow_geometry(start, end, style.arrow_head_length());

    let _ = ctx.save();
    style.color.apply(ctx);

    ctx.set_line_width(style.line_width());
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.move_to(start.x, start.y);
    ctx.line_to(geom.shaft_end.x, geom.shaft_end.y);
    let _ = ctx.stroke();

    ctx.move_to(geom.tip.x, geom.tip.y);
    ctx.line_to(geom.left.x, geom.left.y);
    ctx.line_to(geom.right.x, geom.right.y);
    ctx.close_path();
    let _ = ctx.fill();

    let _ = ctx.restore();
}

/// A block of text to rasterize, anchored at the point the user clicked.
#[derive(Debug, Clone, Copy)]
pub struct TextBlock<'a> {
    pub text: &'a str,
    /// Left edge of the text, vertically centered on `anchor.y`
    pub anchor: Point,
    pub font_size: f64,
    pub font: &'a FontDescriptor,
    pub color: Color,
    /// Paint a rounded background in `color` with contrasting glyphs
    pub highlight: bool,
    /// Padding between the text bounds and the highlight background
    pub padding: f64,
    /// Corner radius of the highlight background
    pub corner_radius: f64,
}

/// Measured placement of a laid-out text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtents {
    /// Top-left corner of the logical text bounds
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

fn layout_text(ctx: &cairo::Context, block: &TextBlock<'_>) -> (pango::Layout, TextExtents) {
    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&block.font.to_pango(block.font_size)));
    layout.set_text(block.text);

    let (_ink, logical) = layout.pixel_extents();
    let width = logical.width() as f64;
    let height = logical.height() as f64;

    let extents = TextExtents {
        origin: Point::new(block.anchor.x, block.anchor.y - height / 2.0),
        width,
        height,
    };
    (layout, extents)
}

/// Measures a text block without drawing it.
pub fn measure_text(ctx: &cairo::Context, block: &TextBlock<'_>) -> TextExtents {
    layout_text(ctx, block).1
}

/// Renders a text block using Pango.
///
/// Highlight mode paints a rounded background in the block color first (sized
/// to the measured bounds plus padding) and then the glyphs in black or white,
/// whichever contrasts better. Standard mode paints only the glyphs in the
/// block color.
///
/// # Returns
/// The measured placement of the text.
pub fn render_text(ctx: &cairo::Context, block: &TextBlock<'_>) -> TextExtents {
    let _ = ctx.save();

    // Grayscale antialiasing; subpixel fringes look wrong on a transparent overlay
    ctx.set_antialias(cairo::Antialias::Gray);

    let (layout, extents) = layout_text(ctx, block);

    let glyph_color = if block.highlight {
        rounded_rectangle(
            ctx,
            extents.origin.x - block.padding,
            extents.origin.y - block.padding,
            extents.width + block.padding * 2.0,
            extents.height + block.padding * 2.0,
            block.corner_radius,
        );
        block.color.apply(ctx);
        let _ = ctx.fill();
        block.color.contrasting_text()
    } else {
        block.color
    };

    ctx.move_to(extents.origin.x, extents.origin.y);
    glyph_color.apply(ctx);
    pangocairo::functions::show_layout(ctx, &layout);

    let _ = ctx.restore();
    extents
}

/// Adds a rounded rectangle path to the context (no stroke or fill).
pub fn rounded_rectangle(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, radius: f64) {
    let r = radius.max(0.0).min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        ctx.rectangle(x, y, w, h);
        return;
    }

    ctx.new_sub_path();
    ctx.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    ctx.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    ctx.arc(x + r, y + h - r, r, PI / 2.0, PI);
    ctx.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    ctx.close_path();
}

/// Renders the laser-pointer dot: a solid core with a soft halo.
pub fn render_laser_dot(ctx: &cairo::Context, center: Point, radius: f64, color: Color) {
    let radius = radius.max(1.0);
    let _ = ctx.save();

    ctx.set_source_rgba(color.r, color.g, color.b, color.a * 0.35);
    ctx.arc(center.x, center.y, radius * 1.8, 0.0, 2.0 * PI);
    let _ = ctx.fill();

    color.apply(ctx);
    ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    let _ = ctx.fill();

    let _ = ctx.restore();
}
