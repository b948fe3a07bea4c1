//! Unified error type for the domain layer

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid zone values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for values outside their allowed range.
    ///
    /// # Example
    /// ```ignore
    /// if min_radius > max_radius {
    ///     return Err(DomainError::validation("min radius exceeds max radius"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}
