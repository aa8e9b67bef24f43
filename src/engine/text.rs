//! Pending text field: creation, editing, and commit/discard.

use super::Engine;
use crate::draw::{Color, TextBlock, render_text};
use crate::input::{Key, Tool};
use crate::util::Point;
use std::time::Instant;

/// A text field that has been placed but not yet rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingText {
    /// Click position; text starts here, vertically centered on it
    pub anchor: Point,
    pub font_size: f64,
    /// Draw on a rounded background instead of plain glyphs
    pub highlight: bool,
    pub color: Color,
    pub buffer: String,
    /// When the field opened, for the focus-loss settle window
    pub created_at: Instant,
}

impl PendingText {
    /// Whether the buffer has nothing worth committing.
    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// Glyph color actually painted (contrast color in highlight mode).
    pub fn text_color(&self) -> Color {
        if self.highlight {
            self.color.contrasting_text()
        } else {
            self.color
        }
    }
}

impl Engine {
    /// The text field currently being edited, if any.
    pub fn pending_text(&self) -> Option<&PendingText> {
        self.pending_text.as_ref()
    }

    /// Opens a text field at `anchor`, committing any field already open.
    pub(super) fn open_text_field(&mut self, tool: Tool, anchor: Point, now: Instant) {
        if self.pending_text.is_some() {
            self.commit_text();
        }

        let style = self.style();
        self.pending_text = Some(PendingText {
            anchor,
            font_size: style.font_size(),
            highlight: tool == Tool::TextHighlight,
            color: style.color,
            buffer: String::new(),
            created_at: now,
        });
        self.needs_redraw = true;
        log::debug!("Opened {} field at ({}, {})", tool, anchor.x, anchor.y);
    }

    /// Rasterizes the pending field onto the surface and records a snapshot.
    ///
    /// A blank field is discarded instead and leaves history untouched.
    pub fn commit_text(&mut self) {
        let Some(pending) = self.pending_text.take() else {
            return;
        };
        self.needs_redraw = true;

        if pending.is_blank() {
            log::debug!("Discarding blank text field");
            return;
        }

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
        self.surface.draw(|ctx| {
            render_text(ctx, &block);
        });
        self.commit_snapshot();
        log::debug!("Committed text ({} chars)", pending.buffer.chars().count());
    }

    /// Drops the pending field without touching the surface.
    pub fn cancel_text(&mut self) {
        if self.pending_text.take().is_some() {
            log::debug!("Cancelled text field");
            self.needs_redraw = true;
        }
    }

    /// Host reports that the text field lost keyboard focus.
    pub fn on_focus_lost(&mut self) {
        self.on_focus_lost_at(Instant::now());
    }

    /// Focus loss at an explicit instant.
    ///
    /// Ignored inside the settle window right after the field opened, since
    /// focus moving into the new field can report a spurious loss. Afterwards
    /// the field is committed, or discarded when blank.
    pub fn on_focus_lost_at(&mut self, now: Instant) {
        let Some(pending) = &self.pending_text else {
            return;
        };

        let age = now.saturating_duration_since(pending.created_at);
        if age < self.settings.settle_delay {
            log::debug!("Ignoring focus loss {:?} after text field opened", age);
            return;
        }

        self.commit_text();
    }

    /// Routes a key to the pending field. Returns `false` if no field is open.
    pub(super) fn handle_text_key(&mut self, key: Key) -> bool {
        let Some(pending) = &mut self.pending_text else {
            return false;
        };

        match key {
            Key::Char(c) if !c.is_control() => {
                pending.buffer.push(c);
                self.needs_redraw = true;
            }
            Key::Backspace => {
                if pending.buffer.pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            Key::Return => self.commit_text(),
            Key::Escape => self.cancel_text(),
            Key::Char(_) | Key::Tab | Key::Unknown => {}
        }
        true
    }
}
