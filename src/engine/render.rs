//! Overlay rendering: the pending text field and the laser dot.
//!
//! Neither is part of the surface. Hosts call [`Engine::render_overlay`] on
//! their own context after compositing the surface.

use super::Engine;
use crate::draw::render::{TextBlock, measure_text, render_laser_dot, render_text};

/// Caret line width in pixels.
const CARET_WIDTH: f64 = 2.0;

impl Engine {
    /// Draws transient overlay elements onto a host-provided context.
    pub fn render_overlay(&self, ctx: &cairo::Context) {
        if let Some(pending) = &self.pending_text {
            let block = TextBlock {
                text: &pending.buffer,
                anchor: pending.anchor,
                font_size: pending.font_size,
                font: &self.settings.font,
                color: pending.color,
                highlight: pending.highlight,
                padding: self.settings.highlight_padding,
                corner_radius: self.settings.highlight_corner_radius,
            };

            let extents = if pending.buffer.is_empty() {
                measure_text(ctx, &block)
            } else {
                render_text(ctx, &block)
            };

            // Caret after the last glyph
            let _ = ctx.save();
            let caret_color = if pending.buffer.is_empty() {
                pending.color
            } else {
                pending.text_color()
            };
            caret_color.apply(ctx);
            ctx.set_line_width(CARET_WIDTH);
            let caret_x = extents.origin.x + extents.width + CARET_WIDTH;
            ctx.move_to(caret_x, extents.origin.y);
            ctx.line_to(caret_x, extents.origin.y + extents.height);
            let _ = ctx.stroke();
            let _ = ctx.restore();
        }

        if let Some(position) = self.laser.visible_at() {
            render_laser_dot(
                ctx,
                position,
                self.settings.laser_radius,
                self.settings.laser_color,
            );
        }
    }
}
