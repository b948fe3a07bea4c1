//! Use cases - User story orchestration.
//!
//! Use cases orchestrate stores and ports to fulfill user stories.

pub mod teleport;

// Re-export main types
pub use teleport::TeleportUseCases;
