//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types used for annotation:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Shape`]: Two-point annotation shapes and the [`StrokeStyle`] they are drawn with
//! - [`Surface`]: The raster buffer marks are painted onto, plus [`Snapshot`]s of it
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod font;
pub mod render;
pub mod shape;
pub mod surface;

// Re-export commonly used types at module level
pub use color::{Color, ColorParseError};
pub use font::FontDescriptor;
pub use render::{TextBlock, TextExtents, render_shape, render_shape_preview, render_text};
pub use shape::{Shape, StrokeStyle};
pub use surface::{Snapshot, Surface, SurfaceError};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
