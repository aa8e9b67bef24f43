//! Pointer and touch dispatch.

use super::{DrawingState, Engine};
use crate::draw::render::{PREVIEW_OPACITY, render_eraser_segment, render_pen_segment};
use crate::draw::{Shape, StrokeStyle, render_shape, render_shape_preview};
use crate::input::{MouseButton, Tool};
use crate::util::Point;
use std::time::Instant;

impl Engine {
    /// Processes a pointer button press.
    ///
    /// Ignored unless drawing is enabled, a tool is selected, and the button
    /// is the primary one.
    ///
    /// # Behavior
    /// - Pen/eraser: start an incremental stroke
    /// - Bounded shapes: remember the anchor
    /// - Pointer: show the laser dot
    /// - Text tools: open a text field (committing any open one)
    pub fn on_pointer_down(&mut self, button: MouseButton, point: Point) {
        self.on_pointer_down_at(button, point, Instant::now());
    }

    /// Pointer press at an explicit instant (stamps new text fields).
    pub fn on_pointer_down_at(&mut self, button: MouseButton, point: Point, now: Instant) {
        self.last_pointer = Some(point);

        if button != MouseButton::Left {
            log::debug!("Ignoring {:?} button press", button);
            return;
        }
        let Some(tool) = self.tool else {
            log::debug!("Ignoring press: no tool selected");
            return;
        };
        if !self.drawing_enabled {
            log::debug!("Ignoring press: drawing disabled");
            return;
        }
        if matches!(self.state, DrawingState::Drawing { .. }) {
            log::debug!("Ignoring press: gesture already active");
            return;
        }

        if tool.is_text() {
            self.open_text_field(tool, point, now);
            return;
        }

        if tool == Tool::Pointer {
            self.laser.show(point);
            self.needs_redraw = true;
        }

        self.state = DrawingState::Drawing {
            tool,
            start: point,
            points: vec![point],
            style: self.style(),
        };
    }

    /// Processes pointer motion.
    ///
    /// Only does anything while a gesture is active.
    pub fn on_pointer_move(&mut self, point: Point) {
        self.last_pointer = Some(point);

        let DrawingState::Drawing {
            tool,
            start,
            points,
            style,
        } = &mut self.state
        else {
            return;
        };

        let tool = *tool;
        let start = *start;
        let style = *style;
        let previous = points.last().copied().unwrap_or(start);
        points.push(point);

        match tool {
            Tool::Pen | Tool::Eraser => {
                self.stroke_segment(tool, previous, point, &style);
            }
            Tool::Rectangle | Tool::Ellipse | Tool::Line | Tool::Arrow => {
                self.repaint_from_history();
                if let Some(shape) = Shape::for_tool(tool, start, point) {
                    self.surface.draw(|ctx| {
                        render_shape_preview(ctx, &shape, &style, PREVIEW_OPACITY)
                    });
                }
            }
            Tool::Pointer => {
                self.laser.move_to(point);
                self.needs_redraw = true;
            }
            Tool::TextStandard | Tool::TextHighlight => {}
        }
    }

    /// Processes a pointer button release.
    ///
    /// Finishes the active gesture: freehand strokes and bounded shapes are
    /// committed to history, the laser dot is hidden. The gesture is reset
    /// whatever the tool was.
    pub fn on_pointer_up(&mut self, button: MouseButton, point: Point) {
        self.last_pointer = Some(point);
        if button != MouseButton::Left {
            return;
        }
        self.finish_gesture(point);
    }

    /// Pointer left the surface: acts as a release at the last known position.
    pub fn on_pointer_leave(&mut self) {
        if let Some(point) = self.gesture_end_point() {
            self.finish_gesture(point);
        }
    }

    pub fn on_touch_start(&mut self, point: Point) {
        self.on_touch_start_at(point, Instant::now());
    }

    pub fn on_touch_start_at(&mut self, point: Point, now: Instant) {
        self.on_pointer_down_at(MouseButton::Left, point, now);
    }

    pub fn on_touch_move(&mut self, point: Point) {
        self.on_pointer_move(point);
    }

    /// Touch lifted. Touch-end carries no position, so the last sampled
    /// point finishes the gesture.
    pub fn on_touch_end(&mut self) {
        if let Some(point) = self.gesture_end_point() {
            self.finish_gesture(point);
        }
    }

    pub fn on_touch_cancel(&mut self) {
        self.on_touch_end();
    }

    fn gesture_end_point(&self) -> Option<Point> {
        self.state.last_point().or(self.last_pointer)
    }

    fn finish_gesture(&mut self, point: Point) {
        let DrawingState::Drawing {
            tool, start, style, ..
        } = std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };

        match tool {
            Tool::Pen | Tool::Eraser => {
                self.commit_snapshot();
            }
            Tool::Rectangle | Tool::Ellipse | Tool::Line | Tool::Arrow => {
                self.repaint_from_history();
                if let Some(shape) = Shape::for_tool(tool, start, point) {
                    self.surface.draw(|ctx| render_shape(ctx, &shape, &style));
                }
                self.commit_snapshot();
            }
            Tool::Pointer => {
                if self.laser.hide() {
                    self.needs_redraw = true;
                }
            }
            Tool::TextStandard | Tool::TextHighlight => {}
        }
        log::debug!("Finished {} gesture", tool);
    }

    fn stroke_segment(&mut self, tool: Tool, from: Point, to: Point, style: &StrokeStyle) {
        self.surface.draw(|ctx| {
            if tool == Tool::Eraser {
                render_eraser_segment(ctx, from, to, style);
            } else {
                render_pen_segment(ctx, from, to, style);
            }
        });
        self.needs_redraw = true;
    }
}
