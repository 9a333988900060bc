//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from provider and IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Coordinate outside the valid range, or not a number
    #[error("invalid coordinate: {reason}")]
    InvalidCoordinate { reason: &'static str },
}
