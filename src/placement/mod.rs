//! The placement and constraint-resolution engine
//!
//! Everything in this module tree is a pure computation over
//! `(room, placed units, target position)`. The Bevy layer owns the unit
//! list and the drag input; it calls in here once per pointer move and once
//! on release, and applies whatever comes back. Nothing here does I/O,
//! touches ECS state, or keeps references across frames — the only
//! cross-frame state is the explicit [`drag::DragSession`] value.

pub mod corner;
pub mod drag;
pub mod search;
pub mod snap;
pub mod wall;

use crate::core::state::PlacedUnit;
use crate::geometry::BoundingBox;

// Re-export commonly used items
pub use corner::{corner_slots, find_available_corner, CornerSlot};
pub use drag::{DragOutcome, DragSession};
pub use search::{find_available_position, nearest_wall_slot};
pub use wall::{closest_wall, snap_to_wall, WallConstraint};

/// Tuning values for the constraint resolvers and snap engines
///
/// Distances are engine units (1 unit = 1 m). The engage/release pairs are
/// hysteresis bands: a snap needs to get closer than the engage distance to
/// activate and further than the release distance to let go, so a pointer
/// hovering between the two never toggles the snap state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTuning {
    /// Symmetric buffer used by collision checks during placement
    pub collision_padding: f32,
    /// Distance from the locked wall plane needed to start a wall switch
    pub wall_transition_start: f32,
    /// Re-lock distance while a wall switch is already in flight
    pub wall_transition_continue: f32,
    /// Fraction of the perpendicular offset removed per frame while held
    pub wall_pullback_damping: f32,
    /// Edge-to-edge snap engage distance between same-wall neighbors
    pub wall_snap_engage: f32,
    /// Edge-to-edge snap release distance between same-wall neighbors
    pub wall_snap_release: f32,
    /// Corner-unit neighbor snap engage distance
    pub corner_snap_engage: f32,
    /// Corner-unit neighbor snap release distance
    pub corner_snap_release: f32,
    /// Gap left between corner units snapped adjacent to each other
    pub corner_snap_gap: f32,
    /// Candidate spacing when scanning along a wall
    pub wall_scan_step: f32,
    /// Ring spacing of the free-standing spiral search
    pub spiral_radius_step: f32,
    /// Target arc spacing between samples on a spiral ring
    pub spiral_arc_step: f32,
    /// Safety margin kept between searched positions and the walls
    pub room_margin: f32,
}

impl Default for SnapTuning {
    fn default() -> Self {
        Self {
            collision_padding: 0.1,
            wall_transition_start: 0.5,
            wall_transition_continue: 0.2,
            wall_pullback_damping: 0.3,
            wall_snap_engage: 0.2,
            wall_snap_release: 0.45,
            corner_snap_engage: 0.3,
            corner_snap_release: 0.5,
            corner_snap_gap: 0.05,
            wall_scan_step: 0.3,
            spiral_radius_step: 0.3,
            spiral_arc_step: 0.3,
            room_margin: 0.1,
        }
    }
}

/// Bounding box of a placed unit at its current position and facing
pub fn unit_bounds(unit: &PlacedUnit) -> BoundingBox {
    BoundingBox::from_footprint(unit.position, unit.item.footprint(unit.facing))
}
