//! scrawl: a transient full-screen annotation engine.
//!
//! The [`Engine`] owns a transparent raster surface and turns toolbar
//! selections ([`ControlMessage`]) and pointer/keyboard input ([`InputEvent`])
//! into marks on it, with bounded undo/redo. Window management, always-on-top
//! layering and the toolbar itself belong to the host; it composites
//! [`Engine::surface`] and [`Engine::render_overlay`] onto its own window.

pub mod config;
pub mod control;
pub mod draw;
pub mod engine;
pub mod input;
pub mod util;

pub use config::Config;
pub use control::{ControlMessage, InputEvent};
pub use engine::{Engine, EngineError};
