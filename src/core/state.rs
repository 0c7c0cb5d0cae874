//! Design-session state
//!
//! The session owns the canonical list of placed units. The placement
//! engine only ever sees read snapshots of this list plus one unit to move;
//! all mutation goes through the methods here so the no-overlap and
//! wall/corner rest invariants hold after every commit.

use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::catalog::{CatalogItem, PlacementClass};
use crate::geometry::{Facing, RoomGeometry};
use crate::placement::{self, SnapTuning};

/// Stable identifier of a placed unit within one design session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

/// A furniture unit placed in the room
#[derive(Debug, Clone)]
pub struct PlacedUnit {
    pub id: UnitId,
    /// Read-only copy of the catalog record this unit was created from
    pub item: CatalogItem,
    /// Floor-anchored world position, y is always 0
    pub position: Vec3,
    pub facing: Facing,
    pub created_at: DateTime<Utc>,
}

/// The authoritative design state for one room
#[derive(Resource, Debug, Clone)]
pub struct DesignSession {
    pub room: RoomGeometry,
    units: Vec<PlacedUnit>,
    next_id: u32,
}

impl DesignSession {
    pub fn new(room: RoomGeometry) -> Self {
        Self {
            room,
            units: Vec::new(),
            next_id: 0,
        }
    }

    pub fn units(&self) -> &[PlacedUnit] {
        &self.units
    }

    pub fn get(&self, id: UnitId) -> Option<&PlacedUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Add a catalog item to the design
    ///
    /// Runs the placement search for an initial valid slot, then aligns the
    /// result through the wall/corner resolvers. Returns `None` when the
    /// room has no space left for this item; the caller owns the user-facing
    /// messaging for that case.
    pub fn add_item(
        &mut self,
        item: &CatalogItem,
        preferred: Option<Vec3>,
        tuning: &SnapTuning,
    ) -> Option<UnitId> {
        let (position, facing) = match item.placement {
            PlacementClass::WallAttached => {
                let found =
                    placement::find_available_position(item, &self.units, preferred, &self.room, tuning)?;
                placement::snap_to_wall(found, item, &self.room)
            }
            PlacementClass::CornerAttached => {
                let slot =
                    placement::find_available_corner(item, &self.room, &self.units, None, tuning)?;
                (slot.position, slot.facing)
            }
            PlacementClass::FreeStanding => {
                let found =
                    placement::find_available_position(item, &self.units, preferred, &self.room, tuning)?;
                (found, Facing::North)
            }
        };

        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.push(PlacedUnit {
            id,
            item: item.clone(),
            position,
            facing,
            created_at: Utc::now(),
        });
        info!(
            "Placed {} ({}) at ({:.2}, {:.2})",
            self.units.last().map(|u| u.item.name.as_str()).unwrap_or(""),
            item.item_number,
            position.x,
            position.z
        );
        Some(id)
    }

    /// Apply a position/facing update produced by the engine
    pub fn apply(&mut self, id: UnitId, position: Vec3, facing: Facing) {
        if let Some(unit) = self.units.iter_mut().find(|u| u.id == id) {
            unit.position = position;
            unit.facing = facing;
        }
    }

    pub fn remove(&mut self, id: UnitId) -> bool {
        let before = self.units.len();
        self.units.retain(|u| u.id != id);
        before != self.units.len()
    }

    /// Remove the most recently created unit, if any
    pub fn remove_last(&mut self) -> Option<UnitId> {
        let id = self.units.last().map(|u| u.id)?;
        self.units.pop();
        info!("Removed unit {:?}", id);
        Some(id)
    }

    pub fn clear(&mut self) {
        let count = self.units.len();
        self.units.clear();
        if count > 0 {
            info!("Cleared {} units from the design", count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn ids_stay_unique_after_removal() {
        let catalog = Catalog::load(None).unwrap();
        let item = catalog.get("W-01622").unwrap();
        let mut session = DesignSession::new(RoomGeometry::default());
        let tuning = SnapTuning::default();

        let a = session.add_item(item, None, &tuning).unwrap();
        let b = session.add_item(item, None, &tuning).unwrap();
        assert_ne!(a, b);
        assert!(session.remove(a));
        let c = session.add_item(item, None, &tuning).unwrap();
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn clear_empties_the_design() {
        let catalog = Catalog::load(None).unwrap();
        let item = catalog.get("W-01750").unwrap();
        let mut session = DesignSession::new(RoomGeometry::default());
        let tuning = SnapTuning::default();

        session.add_item(item, None, &tuning).unwrap();
        session.add_item(item, None, &tuning).unwrap();
        session.clear();
        assert!(session.units().is_empty());
    }
}
