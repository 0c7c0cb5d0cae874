//! Axis-aligned bounding boxes and overlap tests
//!
//! All collision in the engine is 2D on the floor plane (x/z). Units only
//! ever rotate in cardinal steps, so a rotated footprint is still axis
//! aligned; it just swaps width and depth for East/West facings.

use bevy::prelude::*;

use crate::geometry::room::{Axis, Facing};

/// Floor-plane extents of a unit, in engine units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Extent along the world x axis
    pub x: f32,
    /// Extent along the world z axis
    pub z: f32,
}

impl Footprint {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Footprint of a `width` x `depth` unit turned to `facing`
    pub fn rotated(width: f32, depth: f32, facing: Facing) -> Self {
        if facing.swaps_footprint() {
            Self::new(depth, width)
        } else {
            Self::new(width, depth)
        }
    }

    pub fn extent(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }
}

/// Axis-aligned bounding box on the floor plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl BoundingBox {
    /// Box of a footprint centered on `position` (y ignored)
    pub fn from_footprint(position: Vec3, footprint: Footprint) -> Self {
        Self {
            min_x: position.x - footprint.x / 2.0,
            max_x: position.x + footprint.x / 2.0,
            min_z: position.z - footprint.z / 2.0,
            max_z: position.z + footprint.z / 2.0,
        }
    }

    /// Separating-axis overlap test with a symmetric padding buffer
    ///
    /// `padding > 0` makes near-touching boxes count as overlapping, which
    /// keeps placed units from sitting exactly edge-to-edge. `padding == 0`
    /// treats exactly touching boxes as disjoint.
    pub fn intersects(&self, other: &BoundingBox, padding: f32) -> bool {
        !(self.max_x + padding <= other.min_x
            || other.max_x + padding <= self.min_x
            || self.max_z + padding <= other.min_z
            || other.max_z + padding <= self.min_z)
    }
}

/// True as soon as the candidate box overlaps any neighbor
pub fn collides_with_any<I>(candidate: &BoundingBox, others: I, padding: f32) -> bool
where
    I: IntoIterator<Item = BoundingBox>,
{
    others
        .into_iter()
        .any(|other| candidate.intersects(&other, padding))
}
