//! The annotation drawing engine.
//!
//! This module turns tool/style selections and pointer/keyboard input into
//! marks on a raster [`Surface`](crate::draw::Surface), and keeps a bounded
//! undo/redo history of snapshots. It is split by concern:
//! - `core`: the [`Engine`] struct, construction, phase and history plumbing
//! - `pointer`: pointer and touch dispatch per tool
//! - `actions`: control messages, key presses and shortcut actions
//! - `text`: the pending text field
//! - `render`: overlay drawing for hosts

mod actions;
mod core;
mod history;
mod laser;
mod pointer;
mod render;
mod text;

#[cfg(test)]
mod tests;

pub use self::core::{DrawingState, Engine, EngineError, EngineSettings, Phase};
pub use history::{DEFAULT_MAX_HISTORY, History};
pub use laser::LaserPointer;
pub use text::PendingText;
