//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies, plus the
//! configuration layer and the location cache.

pub mod cache;
pub mod clock;
pub mod config;
pub mod messenger;
pub mod players;
pub mod ports;
pub mod terrain;
pub mod wallet;
pub mod zones;
