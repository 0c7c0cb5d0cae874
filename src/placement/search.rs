//! Placement search for newly added units
//!
//! Runs once when a catalog item is added without an explicit drop
//! position. Wall units get a "smart" search that clusters them on already
//! occupied walls; corner units take the first free canonical slot;
//! free-standing units spiral outward from the preferred point. `None`
//! always means the room genuinely has no space for this item — it is a
//! result, not an error, and the engine never falls back to a colliding
//! position.

use bevy::prelude::*;

use crate::catalog::{CatalogItem, PlacementClass};
use crate::core::state::PlacedUnit;
use crate::geometry::{collides_with_any, BoundingBox, RoomGeometry, Wall};
use crate::placement::corner::find_available_corner;
use crate::placement::wall::WallConstraint;
use crate::placement::{unit_bounds, SnapTuning};
use std::f32::consts::TAU;

/// Find a valid, non-colliding position for a new unit
///
/// The result still goes through the wall/corner snap functions for final
/// alignment and rotation before the unit is committed.
pub fn find_available_position(
    item: &CatalogItem,
    units: &[PlacedUnit],
    preferred: Option<Vec3>,
    room: &RoomGeometry,
    tuning: &SnapTuning,
) -> Option<Vec3> {
    if units.is_empty() {
        return Some(preferred.unwrap_or(Vec3::ZERO));
    }
    match item.placement {
        PlacementClass::WallAttached => wall_search(item, units, room, tuning),
        PlacementClass::CornerAttached => {
            find_available_corner(item, room, units, None, tuning).map(|slot| slot.position)
        }
        PlacementClass::FreeStanding => {
            spiral_search(preferred.unwrap_or(Vec3::ZERO), item, units, room, tuning)
        }
    }
}

/// Smart wall-slot search
///
/// Prefers the least-crowded wall that already carries at least one wall
/// unit and puts the newcomer next to an existing unit there, so wall
/// wardrobes grow in runs instead of scattering. Only when no occupied wall
/// has room does it open a fresh wall, centered.
fn wall_search(
    item: &CatalogItem,
    units: &[PlacedUnit],
    room: &RoomGeometry,
    tuning: &SnapTuning,
) -> Option<Vec3> {
    // Bucket existing wall units by the wall at their back
    let mut buckets: [Vec<&PlacedUnit>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    for unit in units {
        if unit.item.placement == PlacementClass::WallAttached {
            let index = Wall::ALL
                .iter()
                .position(|w| *w == unit.facing.wall_behind())
                .unwrap_or(0);
            buckets[index].push(unit);
        }
    }

    // Occupied walls, least crowded first (stable in Wall order on ties)
    let mut occupied: Vec<usize> = (0..4).filter(|&i| !buckets[i].is_empty()).collect();
    occupied.sort_by_key(|&i| buckets[i].len());

    for &index in &occupied {
        let wall = Wall::ALL[index];
        let constraint = WallConstraint::resolve(wall, room, item);
        let candidates = scan_wall(&constraint, item, units, tuning);
        // Cluster: among valid candidates, the one nearest any unit already
        // on this wall
        let best = candidates.into_iter().min_by(|a, b| {
            nearest_unit_distance(*a, &buckets[index])
                .total_cmp(&nearest_unit_distance(*b, &buckets[index]))
        });
        if let Some(position) = best {
            return Some(position);
        }
    }

    // Fresh walls in fixed order, centered on the first that fits
    for (index, wall) in Wall::ALL.into_iter().enumerate() {
        if !buckets[index].is_empty() {
            continue;
        }
        let constraint = WallConstraint::resolve(wall, room, item);
        let candidates = scan_wall(&constraint, item, units, tuning);
        if !candidates.is_empty() {
            return Some(candidates[candidates.len() / 2]);
        }
    }

    None
}

/// Non-colliding candidate positions along one wall, in slide order
fn scan_wall(
    constraint: &WallConstraint,
    item: &CatalogItem,
    units: &[PlacedUnit],
    tuning: &SnapTuning,
) -> Vec<Vec3> {
    let mut candidates = Vec::new();
    let footprint = item.footprint(constraint.facing);
    let mut consider = |slide: f32| {
        let position = constraint.position_at(slide);
        let candidate = BoundingBox::from_footprint(position, footprint);
        if !collides_with_any(&candidate, units.iter().map(unit_bounds), tuning.collision_padding)
        {
            candidates.push(position);
        }
    };
    let steps = (2.0 * constraint.slide_limit / tuning.wall_scan_step).floor() as usize;
    for i in 0..=steps {
        consider(-constraint.slide_limit + i as f32 * tuning.wall_scan_step);
    }
    // The far end of the wall is a slot of its own when the span is not an
    // exact multiple of the scan step
    if steps as f32 * tuning.wall_scan_step < 2.0 * constraint.slide_limit - 1e-6 {
        consider(constraint.slide_limit);
    }
    candidates
}

/// Nearest non-colliding slide slot on `constraint`'s wall
///
/// Used on drag release when the locked pose overlaps a neighbor; `units`
/// must already exclude the unit being placed.
pub fn nearest_wall_slot(
    constraint: &WallConstraint,
    item: &CatalogItem,
    units: &[PlacedUnit],
    near: f32,
    tuning: &SnapTuning,
) -> Option<Vec3> {
    let slide_axis = constraint.slide_axis();
    scan_wall(constraint, item, units, tuning).into_iter().min_by(|a, b| {
        (slide_axis.of(*a) - near)
            .abs()
            .total_cmp(&(slide_axis.of(*b) - near).abs())
    })
}

fn nearest_unit_distance(position: Vec3, units: &[&PlacedUnit]) -> f32 {
    units
        .iter()
        .map(|u| {
            Vec2::new(position.x - u.position.x, position.z - u.position.z).length()
        })
        .fold(f32::INFINITY, f32::min)
}

/// Spiral search outward from a preferred point
///
/// Samples rings of increasing radius; the number of samples grows with the
/// radius so the arc spacing stays roughly constant. Gives up once the
/// radius exceeds the larger room dimension.
fn spiral_search(
    origin: Vec3,
    item: &CatalogItem,
    units: &[PlacedUnit],
    room: &RoomGeometry,
    tuning: &SnapTuning,
) -> Option<Vec3> {
    let footprint = item.base_footprint();
    let bound_x = room.half_width() - footprint.x / 2.0 - tuning.room_margin;
    let bound_z = room.half_depth() - footprint.z / 2.0 - tuning.room_margin;
    if bound_x < 0.0 || bound_z < 0.0 {
        // Unit larger than the room: no candidate can ever fit
        return None;
    }

    let valid = |position: Vec3| {
        if position.x.abs() > bound_x || position.z.abs() > bound_z {
            return false;
        }
        let candidate = BoundingBox::from_footprint(position, footprint);
        !collides_with_any(&candidate, units.iter().map(unit_bounds), tuning.collision_padding)
    };

    let origin = Vec3::new(origin.x, 0.0, origin.z);
    if valid(origin) {
        return Some(origin);
    }

    let max_radius = room.width.max(room.depth);
    let mut radius = tuning.spiral_radius_step;
    while radius <= max_radius {
        let samples = ((TAU * radius / tuning.spiral_arc_step).ceil() as usize).max(8);
        for i in 0..samples {
            let angle = i as f32 * TAU / samples as f32;
            let position = origin + Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin());
            if valid(position) {
                return Some(position);
            }
        }
        radius += tuning.spiral_radius_step;
    }
    None
}
