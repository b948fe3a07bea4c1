//! API layer - entry points driven by the hosting server.

pub mod events;

pub use events::{PlayerEvent, PlayerEventHandler, EVENT_CHANNEL_BUFFER};
