//! wildwarp domain: zones, teleport sessions, safety rules and the cosmetic
//! timeline. No async runtime and no I/O live here.

pub mod entities;
pub mod error;
pub mod ids;
pub mod messages;
pub mod safety;
pub mod timeline;
pub mod value_objects;
pub mod vertical;

pub use entities::{effective_delay, CancelReason, TeleportPhase, TeleportSession};
pub use error::DomainError;
pub use ids::{PlayerId, SessionId, WorldName};
pub use messages::{Channel, Message, MessageKey, SoundCue};
pub use safety::{is_safe, is_strictly_safe, BlockLookup, SafetyLevel};
pub use timeline::{EffectCue, EffectTimeline, StageDescriptor, StageKind};
pub use value_objects::{
    BlockPos, Capability, Center, Environment, Location, Material, PlayerSnapshot, Position,
    StatusEffect, VitalsChange, WorldBounds, WorldInfo, WorldZoneConfig, ZoneDefaults, ZoneEntry,
};
pub use vertical::{HeightResolution, HeightSource, ScanRange, VerticalStrategy, SEA_LEVEL};
