//! Wall-constraint resolver
//!
//! Wall-attached units rest with their back flush against one wall and only
//! slide along it. During a drag the resolver runs a small state machine:
//! `Locked(wall)` while the pointer stays near the wall plane, a free
//! `Transitioning` flight once the pointer crosses the room toward another
//! wall, then `Locked(new wall)` again. The two thresholds are asymmetric
//! on purpose: a transition needs 0.5 units to start but only 0.2 to keep
//! going, so hovering around one boundary can't flip the state back and
//! forth every frame.

use bevy::prelude::*;

use crate::catalog::CatalogItem;
use crate::geometry::{Axis, Facing, RoomGeometry, Wall};
use crate::placement::SnapTuning;

/// Derived wall lock for one unit, recomputed whenever it's needed
///
/// Never persisted: the locked coordinate and slide clamp go stale as soon
/// as the unit or room changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallConstraint {
    pub wall: Wall,
    /// Orientation that turns the unit's front toward the room interior
    pub facing: Facing,
    /// Center coordinate on the constrained axis when flush with the wall
    pub locked: f32,
    /// Half travel range on the sliding axis
    pub slide_limit: f32,
}

impl WallConstraint {
    /// Lock geometry for `item` against `wall`
    pub fn resolve(wall: Wall, room: &RoomGeometry, item: &CatalogItem) -> Self {
        let facing = wall.facing();
        let footprint = item.footprint(facing);
        let axis = wall.axis();
        let locked = wall.plane(room) - wall.sign() * footprint.extent(axis) / 2.0;
        let slide_axis = axis.other();
        let slide_limit =
            (room.half_extent(slide_axis) - footprint.extent(slide_axis) / 2.0).max(0.0);
        Self {
            wall,
            facing,
            locked,
            slide_limit,
        }
    }

    pub fn axis(&self) -> Axis {
        self.wall.axis()
    }

    pub fn slide_axis(&self) -> Axis {
        self.wall.axis().other()
    }

    /// Position on this wall at the given sliding coordinate
    pub fn position_at(&self, slide: f32) -> Vec3 {
        let mut position = Vec3::ZERO;
        self.axis().set(&mut position, self.locked);
        self.slide_axis()
            .set(&mut position, slide.clamp(-self.slide_limit, self.slide_limit));
        position
    }
}

/// Wall nearest to a floor position
///
/// Ties resolve to the first minimum in `Wall::ALL` order (Right, Left,
/// Back, Front). Exact ties only happen on room center lines; the order is
/// kept from the original configurator and pinned by a test.
pub fn closest_wall(position: Vec3, room: &RoomGeometry) -> Wall {
    let mut best = Wall::Right;
    let mut best_distance = f32::INFINITY;
    for wall in Wall::ALL {
        let distance = wall.distance_to(position, room);
        if distance < best_distance {
            best = wall;
            best_distance = distance;
        }
    }
    best
}

/// Final rest pose against the nearest wall
///
/// The perpendicular coordinate is locked exactly, the sliding coordinate
/// is clamped to the room, and the unit faces the interior. Calling this
/// twice in a row yields the same pose.
pub fn snap_to_wall(position: Vec3, item: &CatalogItem, room: &RoomGeometry) -> (Vec3, Facing) {
    let constraint = WallConstraint::resolve(closest_wall(position, room), room, item);
    let slide = constraint.slide_axis().of(position);
    (constraint.position_at(slide), constraint.facing)
}

/// Per-frame result of constraining a drag against the locked wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallDragUpdate {
    pub position: Vec3,
    /// The drag left the current wall and is heading for another one
    pub should_transition: bool,
    /// Lock for the wall the unit is now flying toward
    pub new_constraint: Option<WallConstraint>,
    /// The pointer position passed through unconstrained this frame
    pub allow_free_movement: bool,
}

/// Constrain one drag frame to slide along the locked wall
///
/// Near the wall the unit slides freely on its axis while the perpendicular
/// offset is rubber-banded back toward the lock (30% removed per frame)
/// instead of snapping, which reads as a smooth correction. Past the
/// threshold the resolver either re-targets the now-closest wall (free
/// flight until it re-locks) or, if the locked wall is still the closest,
/// keeps pulling the unit back.
pub fn constrain_movement_along_wall(
    target: Vec3,
    constraint: &WallConstraint,
    item: &CatalogItem,
    room: &RoomGeometry,
    is_transitioning: bool,
    tuning: &SnapTuning,
) -> WallDragUpdate {
    let distance = constraint.wall.distance_to(target, room);
    let threshold = if is_transitioning {
        tuning.wall_transition_continue
    } else {
        tuning.wall_transition_start
    };

    if distance > threshold {
        let nearest = closest_wall(target, room);
        if nearest != constraint.wall {
            // In flight between walls: hand the raw target back and let the
            // caller re-lock against the new wall once it gets close enough.
            let mut position = target;
            position.y = 0.0;
            return WallDragUpdate {
                position,
                should_transition: true,
                new_constraint: Some(WallConstraint::resolve(nearest, room, item)),
                allow_free_movement: true,
            };
        }
    }

    WallDragUpdate {
        position: held_position(target, constraint, tuning),
        should_transition: false,
        new_constraint: None,
        allow_free_movement: false,
    }
}

/// Slide-clamped position with the damped perpendicular pull-back
fn held_position(target: Vec3, constraint: &WallConstraint, tuning: &SnapTuning) -> Vec3 {
    let offset = constraint.axis().of(target) - constraint.locked;
    let perpendicular = constraint.locked + offset * (1.0 - tuning.wall_pullback_damping);
    let slide = constraint
        .slide_axis()
        .of(target)
        .clamp(-constraint.slide_limit, constraint.slide_limit);
    let mut position = Vec3::ZERO;
    constraint.axis().set(&mut position, perpendicular);
    constraint.slide_axis().set(&mut position, slide);
    position
}

/// Final lock on drag release, from a possibly in-flight position
pub fn handle_wall_transition(
    position: Vec3,
    item: &CatalogItem,
    room: &RoomGeometry,
) -> (Vec3, Facing) {
    snap_to_wall(position, item, room)
}
