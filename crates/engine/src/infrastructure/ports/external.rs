//! External service port traits (wallet, world, players, messaging).

use async_trait::async_trait;
use wildwarp_domain::{
    BlockPos, Capability, Location, Material, Message, PlayerId, PlayerSnapshot, SoundCue,
    StatusEffect, VitalsChange, WorldInfo, WorldName,
};

use super::error::{PlayerError, WalletError, WorldError};

// =============================================================================
// Wallet
// =============================================================================

/// Monetary ledger owned by an external economy service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletPort: Send + Sync {
    /// When disabled every teleport is free and no wallet call is made.
    fn is_enabled(&self) -> bool;

    async fn has_funds(&self, player: PlayerId, amount: f64) -> Result<bool, WalletError>;

    async fn debit(&self, player: PlayerId, amount: f64) -> Result<(), WalletError>;

    async fn credit(&self, player: PlayerId, amount: f64) -> Result<(), WalletError>;

    /// Human-readable amount, e.g. `$100.00`.
    fn format(&self, amount: f64) -> String;
}

// =============================================================================
// World
// =============================================================================

/// Read-only spatial queries.
///
/// Synchronous on purpose: callers run these on the blocking pool, never on
/// the latency-sensitive path.
#[cfg_attr(test, mockall::automock)]
pub trait WorldPort: Send + Sync {
    fn world_info(&self, world: &WorldName) -> Result<WorldInfo, WorldError>;

    /// `None` when the cell is unavailable (unloaded chunk, outside the world).
    fn material_at(&self, world: &WorldName, pos: BlockPos) -> Option<Material>;

    fn highest_solid_y(&self, world: &WorldName, x: i32, z: i32) -> Option<i32>;

    fn biome_at(&self, world: &WorldName, pos: BlockPos) -> Option<String>;
}

// =============================================================================
// Players
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerPort: Send + Sync {
    /// `None` when the player is not connected.
    async fn snapshot(&self, player: PlayerId) -> Result<Option<PlayerSnapshot>, PlayerError>;

    async fn has_capability(&self, player: PlayerId, capability: Capability) -> bool;

    async fn relocate(&self, player: PlayerId, target: &Location) -> Result<(), PlayerError>;

    async fn apply_status_effect(
        &self,
        player: PlayerId,
        effect: &StatusEffect,
    ) -> Result<(), PlayerError>;

    async fn adjust_vitals(&self, player: PlayerId, change: VitalsChange)
        -> Result<(), PlayerError>;
}

// =============================================================================
// Messaging
// =============================================================================

/// Fire-and-forget delivery of keyed messages and sounds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePort: Send + Sync {
    async fn send(&self, player: PlayerId, message: Message);

    async fn play_sound(&self, player: PlayerId, sound: SoundCue);
}
