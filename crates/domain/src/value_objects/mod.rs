//! Value objects: coordinates, materials, environments, zones and player views.

mod coords;
mod environment;
mod material;
mod player;
mod zone;

pub use coords::{BlockPos, Center, Location, Position};
pub use environment::{Environment, WorldBounds, WorldInfo};
pub use material::Material;
pub use player::{Capability, PlayerSnapshot, StatusEffect, VitalsChange};
pub use zone::{WorldZoneConfig, ZoneDefaults, ZoneEntry};
