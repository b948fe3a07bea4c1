//! In-memory state storage modules.
//!
//! Stores manage runtime state that never leaves the process:
//! - `SessionRegistry` - in-flight teleport sessions, one per player
//! - `CooldownLedger` - last successful teleport per player

pub mod cooldown;
pub mod session;

// Re-export store types
pub use cooldown::CooldownLedger;
pub use session::{AlreadyActive, SessionEntry, SessionRegistry};
