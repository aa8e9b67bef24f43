//! Engine state, construction and history plumbing.

use super::history::History;
use super::laser::LaserPointer;
use super::text::PendingText;
use crate::config::{ActionMap, Config};
use crate::draw::{Color, FontDescriptor, Snapshot, StrokeStyle, Surface, SurfaceError};
use crate::input::{CursorHint, Tool};
use crate::util::Point;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while constructing an [`Engine`].
///
/// Everything after construction is infallible: bad input is ignored and bad
/// style values are clamped.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to allocate drawing surface: {0}")]
    Surface(#[from] SurfaceError),

    #[error("invalid keybindings: {0}")]
    Keybindings(String),
}

/// Values the engine reads from configuration once, at construction.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Starting color, and the fallback for unparseable color messages
    pub default_color: Color,
    pub default_stroke_width: u32,
    pub max_history: usize,
    pub font: FontDescriptor,
    /// Window after a text field opens during which focus loss is ignored
    pub settle_delay: Duration,
    pub highlight_padding: f64,
    pub highlight_corner_radius: f64,
    pub laser_radius: f64,
    pub laser_color: Color,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_color: config.default_color(),
            default_stroke_width: config.drawing.default_stroke_width.max(1),
            max_history: config.history.max_history,
            font: config.font_descriptor(),
            settle_delay: config.settle_delay(),
            highlight_padding: config.text.highlight_padding,
            highlight_corner_radius: config.text.highlight_corner_radius,
            laser_radius: config.pointer.radius,
            laser_color: config.pointer_color(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Coarse interaction phase, derived from the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No tool selected or drawing disabled; pointer input is ignored
    Idle,
    /// A tool is selected and drawing is enabled, nothing in progress
    Armed,
    /// Pointer held down, or a text field is pending
    ActiveGesture,
}

/// Pointer gesture state machine.
///
/// Tracks whether a pointer-down has started a gesture that the next
/// move/up events belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Not actively drawing - waiting for a pointer-down
    Idle,
    /// Pointer held down with a tool
    Drawing {
        /// Tool the gesture was started with
        tool: Tool,
        /// Where the pointer went down
        start: Point,
        /// Every sampled point, starting with `start`
        points: Vec<Point>,
        /// Style captured at pointer-down
        style: StrokeStyle,
    },
}

impl DrawingState {
    /// Most recent sampled point of the active gesture.
    pub fn last_point(&self) -> Option<Point> {
        match self {
            DrawingState::Idle => None,
            DrawingState::Drawing { points, start, .. } => Some(*points.last().unwrap_or(start)),
        }
    }
}

/// The annotation drawing engine.
///
/// Owns the raster surface, the current tool and style, the gesture in
/// progress, the pending text field and the undo/redo history. Hosts feed it
/// control messages and pointer/keyboard events and composite
/// [`Engine::surface`] plus [`Engine::render_overlay`] onto their window.
pub struct Engine {
    pub(super) surface: Surface,
    pub(super) history: History<Snapshot>,
    pub(super) tool: Option<Tool>,
    pub(super) drawing_enabled: bool,
    pub(super) color: Color,
    pub(super) stroke_width: u32,
    pub(super) state: DrawingState,
    pub(super) pending_text: Option<PendingText>,
    pub(super) laser: LaserPointer,
    pub(super) settings: EngineSettings,
    pub(super) action_map: ActionMap,
    /// Last position reported by any pointer or touch event
    pub(super) last_pointer: Option<Point>,
    /// Whether the surface or overlay changed since the host last cleared this
    pub needs_redraw: bool,
}

impl Engine {
    /// Creates an engine with default settings and keybindings.
    pub fn new(width: i32, height: i32) -> Result<Self, EngineError> {
        Self::with_config(width, height, &Config::default())
    }

    /// Creates an engine for a `width`x`height` viewport.
    ///
    /// Starts with no tool, drawing disabled, and a history holding one
    /// snapshot of the empty surface.
    pub fn with_config(width: i32, height: i32, config: &Config) -> Result<Self, EngineError> {
        let settings = EngineSettings::from_config(config);
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(EngineError::Keybindings)?;

        let surface = Surface::new(width, height)?;
        let mut history = History::new(settings.max_history);
        history.commit(surface.snapshot()?);

        log::info!(
            "Engine ready: {}x{}, history depth {}",
            width,
            height,
            settings.max_history
        );

        Ok(Self {
            surface,
            history,
            tool: None,
            drawing_enabled: false,
            color: settings.default_color,
            stroke_width: settings.default_stroke_width,
            state: DrawingState::Idle,
            pending_text: None,
            laser: LaserPointer::default(),
            settings,
            action_map,
            last_pointer: None,
            needs_redraw: true,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    pub fn is_drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    /// Style a gesture started now would use.
    pub fn style(&self) -> StrokeStyle {
        StrokeStyle::new(self.color, self.stroke_width)
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if matches!(self.state, DrawingState::Drawing { .. }) || self.pending_text.is_some() {
            Phase::ActiveGesture
        } else if self.drawing_enabled && self.tool.is_some() {
            Phase::Armed
        } else {
            Phase::Idle
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn laser(&self) -> &LaserPointer {
        &self.laser
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// History cursor; `None` means everything was undone.
    pub fn history_cursor(&self) -> Option<usize> {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Cursor shape the host should show over the surface.
    pub fn cursor_hint(&self) -> CursorHint {
        match self.tool {
            Some(tool) if self.drawing_enabled => tool.cursor_hint(),
            _ => CursorHint::Default,
        }
    }

    // ------------------------------------------------------------------
    // Surface / history plumbing
    // ------------------------------------------------------------------

    /// Snapshots the surface into history after a completed edit.
    pub(super) fn commit_snapshot(&mut self) {
        match self.surface.snapshot() {
            Ok(snapshot) => {
                self.history.commit(snapshot);
                log::debug!(
                    "Committed snapshot (len {}, cursor {:?})",
                    self.history.len(),
                    self.history.cursor()
                );
            }
            Err(err) => log::error!("Failed to snapshot surface, edit not recorded: {err}"),
        }
        self.needs_redraw = true;
    }

    /// Erases the surface, then restores the snapshot under the cursor.
    pub(super) fn repaint_from_history(&mut self) {
        self.surface.clear();
        if let Some(snapshot) = self.history.current() {
            self.surface.restore(snapshot);
        }
        self.needs_redraw = true;
    }

    /// Drops an in-progress gesture, undoing any partial marks it left.
    pub(super) fn abandon_gesture(&mut self) {
        if let DrawingState::Drawing { tool, .. } = &self.state {
            let tool = *tool;
            log::debug!("Abandoning {} gesture", tool);
            self.state = DrawingState::Idle;
            if tool.is_freehand() || tool.is_bounded() {
                self.repaint_from_history();
            } else if tool == Tool::Pointer {
                self.laser.hide();
            }
        }
    }

    /// Resizes the surface to a new viewport, keeping content at the origin.
    ///
    /// History snapshots are left at their old size; restoring one anchors it
    /// at the origin the same way.
    pub fn resize(&mut self, width: i32, height: i32) {
        match self.surface.resize(width, height) {
            Ok(true) => self.needs_redraw = true,
            Ok(false) => {}
            Err(err) => log::warn!("Ignoring resize to {width}x{height}: {err}"),
        }
    }
}
