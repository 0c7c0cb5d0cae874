//! Scene and unit rendering
//!
//! Visualization only: the room shell built once from the geometry
//! descriptor, and one cuboid per placed unit kept in sync with the design
//! session. No placement logic lives here; facing-to-rotation conversion
//! happens at this boundary and nowhere else.

pub mod scene;
pub mod units;

pub use scene::ScenePlugin;
pub use units::UnitRenderPlugin;
