//! Drag-time edge-to-edge snapping along a wall
//!
//! While a wall unit slides along its locked wall, it snaps flush against
//! neighbors resting on the same wall. Thresholds are tighter than the
//! corner engine's because wall runs pack units side by side: engage at
//! 0.2, hold until 0.45. A snapped offset *replaces* the sliding
//! coordinate; it is not blended with the wall constraint's output.

use crate::catalog::{CatalogItem, PlacementClass};
use crate::core::state::{PlacedUnit, UnitId};
use crate::geometry::Wall;
use crate::placement::SnapTuning;

/// Snap engagement carried across drag frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallSnapState {
    /// Neighbor the dragged unit is currently flush against
    pub neighbor: Option<UnitId>,
}

/// One frame of the wall snap engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSnapResult {
    /// Sliding-axis coordinate to use this frame
    pub slide: f32,
    pub state: WallSnapState,
    pub engaged: bool,
}

/// Snap the sliding coordinate flush against same-wall neighbors
///
/// For every other unit resting on `wall`, the two flush offsets (dragged
/// unit left-aligned or right-aligned against it) are candidates; the
/// engine keeps the engaged neighbor through the hysteresis band, releases
/// past it, and switches targets when a different neighbor comes closer
/// than the engage distance.
pub fn snap_along_wall(
    slide: f32,
    item: &CatalogItem,
    wall: Wall,
    moving: UnitId,
    units: &[PlacedUnit],
    state: WallSnapState,
    tuning: &SnapTuning,
) -> WallSnapResult {
    let slide_axis = wall.axis().other();
    let width = item.footprint(wall.facing()).extent(slide_axis);

    let flush_offset = |unit: &PlacedUnit| -> f32 {
        let neighbor_slide = slide_axis.of(unit.position);
        let gap = (width + unit.item.footprint(unit.facing).extent(slide_axis)) / 2.0;
        // Of the two flush positions, the one on the dragged unit's side
        let left = neighbor_slide - gap;
        let right = neighbor_slide + gap;
        if (slide - left).abs() <= (slide - right).abs() {
            left
        } else {
            right
        }
    };

    let neighbors = || {
        units.iter().filter(|u| {
            u.id != moving
                && u.item.placement == PlacementClass::WallAttached
                && u.facing == wall.facing()
        })
    };

    // Current engagement survives while within the release distance
    let kept = state
        .neighbor
        .and_then(|id| neighbors().find(|u| u.id == id))
        .map(|u| (u.id, flush_offset(u)))
        .filter(|(_, offset)| (slide - offset).abs() <= tuning.wall_snap_release);

    // The closest other neighbor can take over inside the engage distance
    let challenger = neighbors()
        .filter(|u| Some(u.id) != state.neighbor)
        .map(|u| (u.id, flush_offset(u)))
        .min_by(|a, b| (slide - a.1).abs().total_cmp(&(slide - b.1).abs()))
        .filter(|(_, offset)| (slide - offset).abs() < tuning.wall_snap_engage);

    let engaged = match (kept, challenger) {
        (Some(kept), Some(challenger))
            if (slide - challenger.1).abs() < (slide - kept.1).abs() =>
        {
            Some(challenger)
        }
        (Some(kept), _) => Some(kept),
        (None, Some(challenger)) => Some(challenger),
        (None, None) => None,
    };

    match engaged {
        Some((id, offset)) => WallSnapResult {
            slide: offset,
            state: WallSnapState { neighbor: Some(id) },
            engaged: true,
        },
        None => WallSnapResult {
            slide,
            state: WallSnapState::default(),
            engaged: false,
        },
    }
}
