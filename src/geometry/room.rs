//! Room descriptor, walls, corners and cardinal facings
//!
//! The room is an axis-aligned box centered on the world origin: walls at
//! `x = ±width/2` and `z = ±depth/2`, floor at `y = 0`. One engine unit is
//! 100 cm. Wall and corner enums carry the fixed geometric facts the
//! placement resolvers need, so no raw-radian comparisons leak into the
//! engine; angles exist only at the rendering boundary via
//! [`Facing::radians`].

use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI};

/// Rectangular room dimensions in engine units (1 unit = 100 cm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomGeometry {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub wall_thickness: f32,
}

impl RoomGeometry {
    pub fn new(width: f32, depth: f32, height: f32, wall_thickness: f32) -> Self {
        Self {
            width,
            depth,
            height,
            wall_thickness,
        }
    }

    /// Check the geometric invariants before the room is used anywhere
    ///
    /// Returns human-readable messages so CLI/config validation can show
    /// them directly to the user.
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0.0 || self.depth <= 0.0 || self.height <= 0.0 {
            return Err(format!(
                "Room dimensions must be positive, got {}x{}x{}",
                self.width, self.depth, self.height
            ));
        }
        if self.wall_thickness < 0.0 || self.wall_thickness >= self.width.min(self.depth) / 2.0 {
            return Err(format!(
                "Wall thickness {} must be non-negative and smaller than half the shortest side",
                self.wall_thickness
            ));
        }
        Ok(())
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f32 {
        self.depth / 2.0
    }

    /// Half room extent along the given floor axis
    pub fn half_extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.half_width(),
            Axis::Z => self.half_depth(),
        }
    }
}

impl Default for RoomGeometry {
    /// 4m x 3m room with 2.4m ceiling, 10cm walls
    fn default() -> Self {
        Self::new(4.0, 3.0, 2.4, 0.1)
    }
}

/// One of the two floor axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    pub fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }

    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Z => v.z = value,
        }
    }

    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

/// The four walls, in resolution order
///
/// The order matters: equidistant-wall ties resolve to the first minimum
/// in this order (Right, Left, Back, Front), matching the original
/// behavior of the configurator. Don't reorder without updating the
/// tie-break test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    /// `x = +width/2`
    Right,
    /// `x = -width/2`
    Left,
    /// `z = -depth/2`
    Back,
    /// `z = +depth/2`
    Front,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Right, Wall::Left, Wall::Back, Wall::Front];

    /// The axis a unit on this wall is constrained on
    pub fn axis(self) -> Axis {
        match self {
            Wall::Right | Wall::Left => Axis::X,
            Wall::Back | Wall::Front => Axis::Z,
        }
    }

    /// Sign of the wall plane coordinate (outward direction on `axis`)
    pub fn sign(self) -> f32 {
        match self {
            Wall::Right | Wall::Front => 1.0,
            Wall::Left | Wall::Back => -1.0,
        }
    }

    /// Coordinate of the wall plane on this wall's axis
    pub fn plane(self, room: &RoomGeometry) -> f32 {
        self.sign() * room.half_extent(self.axis())
    }

    /// Perpendicular distance from a floor position to the wall plane
    pub fn distance_to(self, position: Vec3, room: &RoomGeometry) -> f32 {
        (self.axis().of(position) - self.plane(room)).abs()
    }

    /// The facing that points a wall-mounted unit into the room
    pub fn facing(self) -> Facing {
        match self {
            Wall::Right => Facing::West,
            Wall::Left => Facing::East,
            Wall::Back => Facing::North,
            Wall::Front => Facing::South,
        }
    }
}

/// The four room corners, in slot search order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    BackLeft,
    BackRight,
    FrontLeft,
    FrontRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BackLeft,
        Corner::BackRight,
        Corner::FrontLeft,
        Corner::FrontRight,
    ];

    /// Signs of the corner point `(sign_x * width/2, sign_z * depth/2)`
    pub fn signs(self) -> (f32, f32) {
        match self {
            Corner::BackLeft => (-1.0, -1.0),
            Corner::BackRight => (1.0, -1.0),
            Corner::FrontLeft => (-1.0, 1.0),
            Corner::FrontRight => (1.0, 1.0),
        }
    }

    /// Fixed orientation for a corner unit in this corner, flush edges
    /// against the two meeting walls
    pub fn facing(self) -> Facing {
        match self {
            Corner::BackLeft => Facing::North,
            Corner::BackRight => Facing::West,
            Corner::FrontLeft => Facing::East,
            Corner::FrontRight => Facing::South,
        }
    }
}

/// Cardinal orientation of a placed unit
///
/// North faces `+z` (toward the front of the room), yaw 0. This replaces
/// the raw-radian rotation of the original data model; conversion to
/// radians happens only where a transform is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    /// Yaw about the vertical axis, one of {0, π/2, π, 3π/2}
    pub fn radians(self) -> f32 {
        match self {
            Facing::North => 0.0,
            Facing::East => FRAC_PI_2,
            Facing::South => PI,
            Facing::West => PI + FRAC_PI_2,
        }
    }

    /// The wall a unit with this facing has at its back
    pub fn wall_behind(self) -> Wall {
        match self {
            Facing::North => Wall::Back,
            Facing::East => Wall::Left,
            Facing::South => Wall::Front,
            Facing::West => Wall::Right,
        }
    }

    /// Whether this facing turns a unit's width onto the z axis
    pub fn swaps_footprint(self) -> bool {
        matches!(self, Facing::East | Facing::West)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_planes() {
        let room = RoomGeometry::new(4.0, 3.0, 2.4, 0.1);
        assert_eq!(Wall::Right.plane(&room), 2.0);
        assert_eq!(Wall::Left.plane(&room), -2.0);
        assert_eq!(Wall::Back.plane(&room), -1.5);
        assert_eq!(Wall::Front.plane(&room), 1.5);
    }

    #[test]
    fn facing_round_trips_through_walls() {
        for wall in Wall::ALL {
            assert_eq!(wall.facing().wall_behind(), wall);
        }
    }

    #[test]
    fn degenerate_rooms_are_rejected() {
        assert!(RoomGeometry::new(0.0, 3.0, 2.4, 0.1).validate().is_err());
        assert!(RoomGeometry::new(4.0, -1.0, 2.4, 0.1).validate().is_err());
        // wall thickness taking up half the room
        assert!(RoomGeometry::new(2.0, 2.0, 2.4, 1.0).validate().is_err());
        assert!(RoomGeometry::default().validate().is_ok());
    }
}
