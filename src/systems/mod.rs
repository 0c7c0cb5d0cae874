//! Bevy Systems and Plugins
//!
//! The seam between the UI and the placement engine:
//! - Ground-plane pointer tracking
//! - Drag capture feeding the engine one frame at a time
//! - Keyboard input for adding and removing units

pub mod drag;
pub mod pointer;
pub mod spawn;

// Re-export commonly used items
pub use drag::{ActiveDrag, DragPlugin};
pub use pointer::{PointerInfo, PointerPlugin};
pub use spawn::SpawnPlugin;
