//! Domain entities

mod session;

pub use session::{effective_delay, CancelReason, TeleportPhase, TeleportSession};
