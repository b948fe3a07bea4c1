use serde::{Deserialize, Serialize};

use crate::ids::WorldName;

/// Dimension kind of a world; selects the vertical search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Overworld,
    Nether,
    End,
}

/// Vertical build limits. `max_y` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_y: i32,
    pub max_y: i32,
}

impl WorldBounds {
    pub const fn new(min_y: i32, max_y: i32) -> Self {
        Self { min_y, max_y }
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(-64, 320)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldInfo {
    pub name: WorldName,
    pub environment: Environment,
    pub bounds: WorldBounds,
}
