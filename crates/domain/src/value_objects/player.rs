use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::value_objects::Location;

/// Point-in-time view of a player as reported by the hosting server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub location: Location,
    pub alive: bool,
}

/// Permission-like capabilities the orchestrator asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Skips the per-player cooldown.
    BypassCooldown,
    /// May force-teleport other players.
    TeleportOthers,
    /// Refuses force teleports issued by non-privileged players.
    ProtectedFromOthers,
}

/// A timed status effect applied after relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: String,
    pub duration_secs: u32,
    pub amplifier: u8,
}

/// Post-relocation adjustment of a player's vitals.
///
/// The player service clamps food to >= 1 and health to >= 0.5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VitalsChange {
    Hunger(u32),
    Damage(f64),
}
