//! Drag session state machine
//!
//! All state that lives across the frames of one pointer drag sits in this
//! one value: the locked wall, the transition flag, and the engaged snap
//! neighbors. The host creates a session on pointer-down, feeds it one
//! ground-plane target per pointer-move, and finalizes or cancels it on
//! pointer-up. Nothing is captured in closures and nothing survives the
//! session, so every step is testable without a UI.

use bevy::prelude::*;

use crate::catalog::PlacementClass;
use crate::core::state::{PlacedUnit, UnitId};
use crate::geometry::{collides_with_any, BoundingBox, Facing, Footprint, RoomGeometry};
use crate::placement::corner::{release_corner_drag, snap_to_corner_neighbors};
use crate::placement::snap::{snap_along_wall, WallSnapState};
use crate::placement::wall::{
    closest_wall, constrain_movement_along_wall, handle_wall_transition, WallConstraint,
};
use crate::placement::{find_available_position, nearest_wall_slot, unit_bounds, SnapTuning};

/// Resolved pose for the dragged unit this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    pub position: Vec3,
    pub facing: Facing,
}

/// Per-drag state, created on pointer-down and discarded on release
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub unit_id: UnitId,
    placement: PlacementClass,
    start_position: Vec3,
    start_facing: Facing,
    wall: Option<WallConstraint>,
    transitioning: bool,
    wall_snap: WallSnapState,
    corner_neighbor: Option<UnitId>,
}

impl DragSession {
    /// Start dragging `unit`; wall units lock to their current wall
    pub fn begin(unit: &PlacedUnit, room: &RoomGeometry) -> Self {
        let wall = match unit.item.placement {
            PlacementClass::WallAttached => Some(WallConstraint::resolve(
                closest_wall(unit.position, room),
                room,
                &unit.item,
            )),
            _ => None,
        };
        Self {
            unit_id: unit.id,
            placement: unit.item.placement,
            start_position: unit.position,
            start_facing: unit.facing,
            wall,
            transitioning: false,
            wall_snap: WallSnapState::default(),
            corner_neighbor: None,
        }
    }

    /// Constrain one pointer-move frame
    ///
    /// `units` is the full session snapshot including the dragged unit;
    /// returns `None` only if the unit disappeared mid-drag.
    pub fn update(
        &mut self,
        target: Vec3,
        units: &[PlacedUnit],
        room: &RoomGeometry,
        tuning: &SnapTuning,
    ) -> Option<DragOutcome> {
        let unit = units.iter().find(|u| u.id == self.unit_id)?;
        let outcome = match self.placement {
            PlacementClass::WallAttached => self.update_wall(target, unit, units, room, tuning),
            PlacementClass::CornerAttached => {
                let snap = snap_to_corner_neighbors(
                    target,
                    self.unit_id,
                    &unit.item,
                    units,
                    self.corner_neighbor,
                    tuning,
                );
                self.corner_neighbor = snap.snapped_to;
                DragOutcome {
                    position: clamp_to_room(snap.position, unit.item.footprint(unit.facing), room),
                    facing: unit.facing,
                }
            }
            PlacementClass::FreeStanding => DragOutcome {
                position: clamp_to_room(
                    Vec3::new(target.x, 0.0, target.z),
                    unit.item.footprint(unit.facing),
                    room,
                ),
                facing: unit.facing,
            },
        };
        Some(outcome)
    }

    fn update_wall(
        &mut self,
        target: Vec3,
        unit: &PlacedUnit,
        units: &[PlacedUnit],
        room: &RoomGeometry,
        tuning: &SnapTuning,
    ) -> DragOutcome {
        let constraint = self
            .wall
            .unwrap_or_else(|| {
                WallConstraint::resolve(closest_wall(unit.position, room), room, &unit.item)
            });
        let update = constrain_movement_along_wall(
            target,
            &constraint,
            &unit.item,
            room,
            self.transitioning,
            tuning,
        );

        if update.should_transition {
            // In flight toward another wall; re-lock happens in a later
            // frame once the target gets close enough to the new plane.
            self.transitioning = true;
            self.wall = update.new_constraint;
            self.wall_snap = WallSnapState::default();
            return DragOutcome {
                position: update.position,
                facing: unit.facing,
            };
        }

        self.transitioning = false;
        self.wall = Some(constraint);

        // Edge snapping against same-wall neighbors; an engaged snap
        // replaces the sliding coordinate from the wall constraint.
        let slide = constraint.slide_axis().of(update.position);
        let snap = snap_along_wall(
            slide,
            &unit.item,
            constraint.wall,
            self.unit_id,
            units,
            self.wall_snap,
            tuning,
        );
        self.wall_snap = snap.state;
        let mut position = update.position;
        if snap.engaged {
            constraint.slide_axis().set(
                &mut position,
                snap.slide.clamp(-constraint.slide_limit, constraint.slide_limit),
            );
        }
        DragOutcome {
            position,
            facing: constraint.facing,
        }
    }

    /// Finalize on pointer release from the last constrained position
    ///
    /// Wall units lock to their nearest wall, shifting along it if the
    /// locked pose overlaps a neighbor; corner units land in the nearest
    /// free canonical slot; free-standing units keep the drop point unless
    /// it collides, in which case the spiral search resolves it. When
    /// nothing works the unit reverts to its pre-drag pose; an overlapping
    /// placement is never committed.
    pub fn release(
        &mut self,
        last: Vec3,
        units: &[PlacedUnit],
        room: &RoomGeometry,
        tuning: &SnapTuning,
    ) -> Option<DragOutcome> {
        let unit = units.iter().find(|u| u.id == self.unit_id)?;
        let outcome = match self.placement {
            PlacementClass::WallAttached => {
                let (position, facing) = handle_wall_transition(last, &unit.item, room);
                let others: Vec<PlacedUnit> = units
                    .iter()
                    .filter(|u| u.id != self.unit_id)
                    .cloned()
                    .collect();
                let candidate =
                    BoundingBox::from_footprint(position, unit.item.footprint(facing));
                if !collides_with_any(
                    &candidate,
                    others.iter().map(unit_bounds),
                    tuning.collision_padding,
                ) {
                    DragOutcome { position, facing }
                } else {
                    let constraint =
                        WallConstraint::resolve(facing.wall_behind(), room, &unit.item);
                    let near = constraint.slide_axis().of(position);
                    match nearest_wall_slot(&constraint, &unit.item, &others, near, tuning) {
                        Some(position) => DragOutcome { position, facing },
                        None => self.revert(),
                    }
                }
            }
            PlacementClass::CornerAttached => {
                match release_corner_drag(last, self.unit_id, &unit.item, room, units, tuning) {
                    Some((position, facing)) => DragOutcome { position, facing },
                    None => self.revert(),
                }
            }
            PlacementClass::FreeStanding => {
                let others: Vec<PlacedUnit> = units
                    .iter()
                    .filter(|u| u.id != self.unit_id)
                    .cloned()
                    .collect();
                let dropped = clamp_to_room(last, unit.item.footprint(unit.facing), room);
                let candidate =
                    BoundingBox::from_footprint(dropped, unit.item.footprint(unit.facing));
                if !collides_with_any(
                    &candidate,
                    others.iter().map(unit_bounds),
                    tuning.collision_padding,
                ) {
                    DragOutcome {
                        position: dropped,
                        facing: unit.facing,
                    }
                } else {
                    match find_available_position(&unit.item, &others, Some(dropped), room, tuning)
                    {
                        Some(position) => DragOutcome {
                            position,
                            facing: unit.facing,
                        },
                        None => self.revert(),
                    }
                }
            }
        };
        self.reset();
        Some(outcome)
    }

    /// Abort the drag: snap state is cleared and the unit goes back to the
    /// legal pose it had before the drag started
    pub fn cancel(&mut self) -> DragOutcome {
        self.reset();
        self.revert()
    }

    fn revert(&self) -> DragOutcome {
        DragOutcome {
            position: self.start_position,
            facing: self.start_facing,
        }
    }

    fn reset(&mut self) {
        self.transitioning = false;
        self.wall = None;
        self.wall_snap = WallSnapState::default();
        self.corner_neighbor = None;
    }
}

/// Keep a footprint fully inside the room walls
fn clamp_to_room(position: Vec3, footprint: Footprint, room: &RoomGeometry) -> Vec3 {
    let bound_x = (room.half_width() - footprint.x / 2.0).max(0.0);
    let bound_z = (room.half_depth() - footprint.z / 2.0).max(0.0);
    Vec3::new(
        position.x.clamp(-bound_x, bound_x),
        0.0,
        position.z.clamp(-bound_z, bound_z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogItem};
    use crate::geometry::Wall;
    use chrono::Utc;

    fn catalog() -> Catalog {
        Catalog::load(None).unwrap()
    }

    fn room() -> RoomGeometry {
        RoomGeometry::new(4.0, 3.0, 2.4, 0.1)
    }

    fn placed(id: u32, item: &CatalogItem, position: Vec3, facing: Facing) -> PlacedUnit {
        PlacedUnit {
            id: UnitId(id),
            item: item.clone(),
            position,
            facing,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn wall_unit_slides_along_its_wall() {
        let catalog = catalog();
        let item = catalog.get("W-01684").unwrap();
        let room = room();
        let tuning = SnapTuning::default();
        let (start, facing) = crate::placement::snap_to_wall(Vec3::ZERO, item, &room);
        let units = vec![placed(0, item, start, facing)];
        let mut session = DragSession::begin(&units[0], &room);

        // Target along the wall with a small perpendicular wobble
        let outcome = session
            .update(Vec3::new(0.8, 0.0, start.z + 0.1), &units, &room, &tuning)
            .unwrap();
        assert_eq!(outcome.position.x, 0.8);
        // Perpendicular wobble damped toward the lock, not passed through
        assert!((outcome.position.z - start.z).abs() < 0.1);
        assert_eq!(outcome.facing, Facing::North);
    }

    #[test]
    fn dragging_across_the_room_switches_walls_and_release_locks() {
        let catalog = catalog();
        let item = catalog.get("W-01684").unwrap();
        let room = room();
        let tuning = SnapTuning::default();
        let (start, facing) = crate::placement::snap_to_wall(Vec3::new(0.0, 0.0, -1.0), item, &room);
        let units = vec![placed(0, item, start, facing)];
        let mut session = DragSession::begin(&units[0], &room);

        // Pull far toward the front wall: free flight
        let mid = session
            .update(Vec3::new(0.0, 0.0, 1.0), &units, &room, &tuning)
            .unwrap();
        assert_eq!(mid.position.z, 1.0);

        // Release mid-flight: locks against the now-nearest wall
        let end = session
            .release(mid.position, &units, &room, &tuning)
            .unwrap();
        assert_eq!(end.facing, Facing::South);
        assert_eq!(end.position.z, room.half_depth() - item.depth_cm / 100.0 / 2.0);
    }

    #[test]
    fn wall_release_shifts_off_an_overlapping_neighbor() {
        let catalog = catalog();
        let item = catalog.get("W-01684").unwrap();
        let room = room();
        let tuning = SnapTuning::default();
        let constraint = WallConstraint::resolve(Wall::Back, &room, item);
        let anchor = placed(0, item, constraint.position_at(0.0), Facing::North);
        let moved = placed(1, item, constraint.position_at(-1.2), Facing::North);
        let units = vec![anchor.clone(), moved.clone()];
        let mut session = DragSession::begin(&moved, &room);

        // 0.5 from the flush offset: outside the snap band, and the locked
        // pose alone would sit half inside the anchor
        let end = session
            .release(constraint.position_at(0.5), &units, &room, &tuning)
            .unwrap();
        let landed = BoundingBox::from_footprint(end.position, item.footprint(end.facing));
        assert!(!landed.intersects(&unit_bounds(&anchor), 0.0));
        // Still locked to the back wall, shifted to the nearest free slot
        assert_eq!(end.facing, Facing::North);
        assert_eq!(end.position.z, constraint.locked);
        assert!((end.position.x - 1.2).abs() < 1e-5);
    }

    #[test]
    fn packed_wall_release_reverts_instead_of_overlapping() {
        let catalog = catalog();
        let item = catalog.get("W-01684").unwrap();
        let room = room();
        let tuning = SnapTuning::default();
        // Four 1m units pack the 4m back wall edge to edge
        let constraint = WallConstraint::resolve(Wall::Back, &room, item);
        let units: Vec<_> = [-1.5_f32, -0.5, 0.5, 1.5]
            .iter()
            .enumerate()
            .map(|(i, &x)| placed(i as u32, item, constraint.position_at(x), Facing::North))
            .collect();
        let mut session = DragSession::begin(&units[0], &room);

        // No free slot anywhere on the wall: the unit goes back where it was
        let end = session
            .release(constraint.position_at(0.3), &units, &room, &tuning)
            .unwrap();
        assert_eq!(end.position, units[0].position);
        assert_eq!(end.facing, units[0].facing);
        for other in &units[1..] {
            let landed = BoundingBox::from_footprint(end.position, item.footprint(end.facing));
            assert!(!landed.intersects(&unit_bounds(other), 0.0));
        }
    }

    #[test]
    fn free_unit_release_never_commits_an_overlap() {
        let catalog = catalog();
        let item = catalog.get("W-01750").unwrap();
        let room = room();
        let tuning = SnapTuning::default();
        let blocker = placed(0, item, Vec3::ZERO, Facing::North);
        let moved = placed(1, item, Vec3::new(1.0, 0.0, 1.0), Facing::North);
        let units = vec![blocker.clone(), moved.clone()];
        let mut session = DragSession::begin(&moved, &room);

        // Drop right on top of the blocker
        let end = session
            .release(Vec3::ZERO, &units, &room, &tuning)
            .unwrap();
        let landed = BoundingBox::from_footprint(end.position, item.base_footprint());
        assert!(!landed.intersects(&unit_bounds(&blocker), 0.0));
    }

    #[test]
    fn cancel_reverts_to_the_pre_drag_pose() {
        let catalog = catalog();
        let item = catalog.get("W-01701").unwrap();
        let room = room();
        let tuning = SnapTuning::default();
        let slots = crate::placement::corner_slots(&room, item);
        let unit = placed(0, item, slots[0].position, slots[0].facing);
        let units = vec![unit.clone()];
        let mut session = DragSession::begin(&unit, &room);

        session
            .update(Vec3::new(0.4, 0.0, 0.4), &units, &room, &tuning)
            .unwrap();
        let outcome = session.cancel();
        assert_eq!(outcome.position, unit.position);
        assert_eq!(outcome.facing, unit.facing);
    }

    #[test]
    fn corner_release_lands_in_a_canonical_slot() {
        let catalog = catalog();
        let item = catalog.get("W-01701").unwrap();
        let room = room();
        let tuning = SnapTuning::default();
        let slots = crate::placement::corner_slots(&room, item);
        let unit = placed(0, item, slots[0].position, slots[0].facing);
        let units = vec![unit.clone()];
        let mut session = DragSession::begin(&unit, &room);

        let end = session
            .release(Vec3::new(1.2, 0.0, 0.8), &units, &room, &tuning)
            .unwrap();
        assert!(slots
            .iter()
            .any(|slot| slot.position == end.position && slot.facing == end.facing));
    }
}
