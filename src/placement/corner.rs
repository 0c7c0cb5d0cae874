//! Corner-constraint resolver
//!
//! Corner-attached units live in one of the four canonical corner slots.
//! While a corner unit is being dragged it snaps relative to *other* corner
//! units (adjacent at a half-diagonal offset), with a wider hysteresis band
//! than wall sliding because corner units roam the whole floor. On release
//! the unit always lands in a canonical slot, never in the ad-hoc
//! mid-drag position.

use bevy::prelude::*;

use crate::catalog::{CatalogItem, PlacementClass};
use crate::core::state::{PlacedUnit, UnitId};
use crate::geometry::{collides_with_any, BoundingBox, Corner, Facing, RoomGeometry};
use crate::placement::{unit_bounds, SnapTuning};

/// One of the four fixed corner anchor poses for a given unit size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSlot {
    pub corner: Corner,
    /// Anchor center, inset from the true corner by half the footprint
    pub position: Vec3,
    pub facing: Facing,
}

/// The four corner slots for `item`, in fixed search order
pub fn corner_slots(room: &RoomGeometry, item: &CatalogItem) -> [CornerSlot; 4] {
    Corner::ALL.map(|corner| {
        let facing = corner.facing();
        let footprint = item.footprint(facing);
        let (sign_x, sign_z) = corner.signs();
        CornerSlot {
            corner,
            position: Vec3::new(
                sign_x * (room.half_width() - footprint.x / 2.0),
                0.0,
                sign_z * (room.half_depth() - footprint.z / 2.0),
            ),
            facing,
        }
    })
}

/// Whether `item` fits in `slot` without hitting any other unit
///
/// Checked against every placed unit, not just corner-attached ones; a
/// free-standing unit shoved into a corner blocks the slot all the same.
pub fn is_corner_available(
    slot: &CornerSlot,
    moving: Option<UnitId>,
    item: &CatalogItem,
    units: &[PlacedUnit],
    tuning: &SnapTuning,
) -> bool {
    let candidate = BoundingBox::from_footprint(slot.position, item.footprint(slot.facing));
    let others = units
        .iter()
        .filter(|u| Some(u.id) != moving)
        .map(unit_bounds);
    !collides_with_any(&candidate, others, tuning.collision_padding)
}

/// First free corner slot in fixed order, or `None` when all four are taken
pub fn find_available_corner(
    item: &CatalogItem,
    room: &RoomGeometry,
    units: &[PlacedUnit],
    moving: Option<UnitId>,
    tuning: &SnapTuning,
) -> Option<CornerSlot> {
    corner_slots(room, item)
        .into_iter()
        .find(|slot| is_corner_available(slot, moving, item, units, tuning))
}

/// Mid-drag position of a corner unit after neighbor-relative snapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSnap {
    pub position: Vec3,
    /// Neighbor the unit is currently snapped against, if any
    pub snapped_to: Option<UnitId>,
}

/// Drag-time snapping of a corner unit against other corner units
///
/// Engages when the pointer gets within the engage distance of another
/// corner unit's center and parks the moving unit adjacent to it (both
/// half-diagonals plus a small gap, on the pointer's side). An engaged snap
/// only lets go once the pointer moves past the release distance, so
/// wobbling between the two distances never toggles it.
pub fn snap_to_corner_neighbors(
    target: Vec3,
    moving: UnitId,
    item: &CatalogItem,
    units: &[PlacedUnit],
    snapped_to: Option<UnitId>,
    tuning: &SnapTuning,
) -> CornerSnap {
    let neighbors = || {
        units
            .iter()
            .filter(|u| u.id != moving && u.item.placement == PlacementClass::CornerAttached)
    };

    // Keep the current snap while inside the release band
    let kept = snapped_to
        .and_then(|id| neighbors().find(|u| u.id == id))
        .filter(|u| floor_distance(target, u.position) <= tuning.corner_snap_release);

    // A different neighbor inside the engage band takes over if closer
    let closest = neighbors()
        .map(|u| (u, floor_distance(target, u.position)))
        .filter(|(u, d)| *d < tuning.corner_snap_engage && Some(u.id) != snapped_to)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let chosen = match (kept, closest) {
        (Some(kept), Some((other, d))) if d < floor_distance(target, kept.position) => Some(other),
        (Some(kept), _) => Some(kept),
        (None, Some((other, _))) => Some(other),
        (None, None) => None,
    };

    match chosen {
        Some(neighbor) => {
            let offset = item.half_diagonal() + neighbor.item.half_diagonal() + tuning.corner_snap_gap;
            let away = Vec3::new(
                target.x - neighbor.position.x,
                0.0,
                target.z - neighbor.position.z,
            )
            .try_normalize()
            .unwrap_or(Vec3::X);
            CornerSnap {
                position: neighbor.position + away * offset,
                snapped_to: Some(neighbor.id),
            }
        }
        None => CornerSnap {
            position: Vec3::new(target.x, 0.0, target.z),
            snapped_to: None,
        },
    }
}

/// Final pose on drag release: the nearest still-available canonical slot
///
/// `None` means every corner is occupied or blocked and the caller should
/// put the unit back where the drag started.
pub fn release_corner_drag(
    position: Vec3,
    moving: UnitId,
    item: &CatalogItem,
    room: &RoomGeometry,
    units: &[PlacedUnit],
    tuning: &SnapTuning,
) -> Option<(Vec3, Facing)> {
    corner_slots(room, item)
        .into_iter()
        .filter(|slot| is_corner_available(slot, Some(moving), item, units, tuning))
        .min_by(|a, b| {
            floor_distance(position, a.position).total_cmp(&floor_distance(position, b.position))
        })
        .map(|slot| (slot.position, slot.facing))
}

fn floor_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}
