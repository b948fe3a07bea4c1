//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};

// =============================================================================
// Testability Ports
// =============================================================================

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Uniform sample in `[0, 1)`.
    fn gen_unit(&self) -> f64;
}
