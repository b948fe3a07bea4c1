//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Wallet (could swap in-memory -> external economy service)
//! - World queries (block classification, surface, biome)
//! - Players (snapshot, capabilities, relocation, vitals)
//! - Messaging (keyed messages with placeholders, sounds)
//! - Clock/Random (for testing)

mod error;
mod external;
mod testing;

// =============================================================================
// Errors
// =============================================================================
pub use error::{PlayerError, WalletError, WorldError};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{MessagePort, PlayerPort, WalletPort, WorldPort};

#[cfg(test)]
pub use external::{MockMessagePort, MockPlayerPort, MockWalletPort, MockWorldPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};
