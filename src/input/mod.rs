//! Input vocabulary shared by the engine, the control channel and the config.
//!
//! Hosts translate their native keyboard and pointer events into these
//! generic types before handing them to the engine.

pub mod events;
pub mod modifiers;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use tool::{CursorHint, Tool};
