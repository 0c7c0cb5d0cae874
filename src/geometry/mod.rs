//! Geometric Primitives and Operations
//!
//! Pure geometry shared by the placement engine and the scene layer:
//! the room descriptor, walls/corners/facings, and axis-aligned
//! bounding boxes for collision tests.

pub mod bounds;
pub mod room;

// Re-export commonly used items
pub use bounds::{collides_with_any, BoundingBox, Footprint};
pub use room::{Axis, Corner, Facing, RoomGeometry, Wall};
