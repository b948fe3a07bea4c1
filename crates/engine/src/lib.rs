//! WildWarp Engine library.
//!
//! Random-teleport orchestration: per-player sessions, the cosmetic
//! countdown, the safe-location search and the cancellation/refund protocol.
//!
//! ## Structure
//!
//! - `stores/` - In-memory runtime state (sessions, cooldowns)
//! - `use_cases/` - User story orchestration across stores and ports
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - Event entry points driven by the host
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
