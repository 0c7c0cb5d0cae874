//! Product catalog
//!
//! Static wardrobe descriptors loaded from JSON. A small default catalog is
//! embedded in the binary; `--catalog <path>` replaces it. Catalog records
//! carry real-world centimeter sizes and a first-class placement class, so
//! the engine never has to sniff model paths to decide how a unit behaves.

use anyhow::{bail, Context, Result};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::geometry::{Facing, Footprint};

/// Engine length unit in centimeters (1 unit = 1 m)
pub const CM_PER_UNIT: f32 = 100.0;

/// How a unit is allowed to sit in the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementClass {
    /// No wall/corner constraint, only collision avoidance
    FreeStanding,
    /// Back face flush against a wall, slides along it
    WallAttached,
    /// Occupies one of the four room corners
    CornerAttached,
}

/// One catalog product, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable identifier, e.g. "W-01684"
    pub item_number: String,
    pub name: String,
    /// Real-world size in centimeters
    pub width_cm: f32,
    pub height_cm: f32,
    pub depth_cm: f32,
    pub price: f32,
    pub placement: PlacementClass,
    /// Asset reference, opaque to the engine
    pub model: String,
}

impl CatalogItem {
    /// Unrotated floor footprint in engine units
    pub fn base_footprint(&self) -> Footprint {
        Footprint::new(self.width_cm / CM_PER_UNIT, self.depth_cm / CM_PER_UNIT)
    }

    /// Floor footprint of the unit turned to `facing`
    pub fn footprint(&self, facing: Facing) -> Footprint {
        Footprint::rotated(
            self.width_cm / CM_PER_UNIT,
            self.depth_cm / CM_PER_UNIT,
            facing,
        )
    }

    pub fn height_units(&self) -> f32 {
        self.height_cm / CM_PER_UNIT
    }

    /// Half the footprint diagonal, used for neighbor-relative corner snaps
    pub fn half_diagonal(&self) -> f32 {
        let fp = self.base_footprint();
        ((fp.x / 2.0).powi(2) + (fp.z / 2.0).powi(2)).sqrt()
    }
}

/// The loaded product catalog
#[derive(Resource, Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Load the embedded catalog, or a user-provided JSON file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let items: Vec<CatalogItem> = match path {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Invalid catalog JSON in {}", path.display()))?
            }
            None => serde_json::from_str(include_str!("default_catalog.json"))
                .context("Embedded default catalog is invalid")?,
        };
        if items.is_empty() {
            bail!("Catalog contains no items");
        }
        debug!("Loaded catalog with {} items", items.len());
        Ok(Self { items })
    }

    /// Look up an item by its stable identifier
    ///
    /// A miss is a data-integrity error (a placed unit referencing an item
    /// the catalog no longer has), so it fails loudly instead of defaulting.
    pub fn get(&self, item_number: &str) -> Result<&CatalogItem> {
        match self.items.iter().find(|i| i.item_number == item_number) {
            Some(item) => Ok(item),
            None => bail!("Unknown catalog item: {item_number}"),
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = Catalog::load(None).unwrap();
        assert!(!catalog.items().is_empty());
        // Exactly one wall-attached and one corner-attached product
        let walls = catalog
            .items()
            .iter()
            .filter(|i| i.placement == PlacementClass::WallAttached)
            .count();
        let corners = catalog
            .items()
            .iter()
            .filter(|i| i.placement == PlacementClass::CornerAttached)
            .count();
        assert_eq!(walls, 1);
        assert_eq!(corners, 1);
    }

    #[test]
    fn unknown_item_is_a_hard_error() {
        let catalog = Catalog::load(None).unwrap();
        assert!(catalog.get("W-00000").is_err());
    }

    #[test]
    fn footprint_converts_centimeters() {
        let catalog = Catalog::load(None).unwrap();
        let item = catalog.get("W-01684").unwrap();
        let fp = item.base_footprint();
        assert!((fp.x - item.width_cm / 100.0).abs() < f32::EPSILON);
        assert!((fp.z - item.depth_cm / 100.0).abs() < f32::EPSILON);
    }
}
