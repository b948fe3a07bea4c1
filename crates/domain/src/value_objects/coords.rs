//! Block and entity coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::WorldName;

/// Integer coordinate of a single block cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub const fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    pub const fn above(self) -> Self {
        self.offset(0, 1, 0)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Continuous entity position inside a world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Feet position centred on the given standing cell.
    pub fn standing_on(cell: BlockPos) -> Self {
        Self::new(
            f64::from(cell.x) + 0.5,
            f64::from(cell.y),
            f64::from(cell.z) + 0.5,
        )
    }

    pub fn distance_squared(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn block(&self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

/// A position qualified by the world it lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: WorldName,
    pub position: Position,
}

impl Location {
    pub fn new(world: impl Into<WorldName>, position: Position) -> Self {
        Self {
            world: world.into(),
            position,
        }
    }

    /// Squared distance to `other`, or `None` when the two are in different worlds.
    pub fn distance_squared(&self, other: &Location) -> Option<f64> {
        (self.world == other.world).then(|| self.position.distance_squared(&other.position))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.1}, {:.1}, {:.1})",
            self.world, self.position.x, self.position.y, self.position.z
        )
    }
}

/// Planar centre of a teleport zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    pub x: i32,
    pub z: i32,
}

impl Center {
    pub const ORIGIN: Center = Center { x: 0, z: 0 };

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}
