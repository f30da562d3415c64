//! Error types for capability negotiation.

use thiserror::Error;

/// Errors raised by capability validation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CapabilityError {
    /// One or more required capabilities are absent from the connected
    /// server's set. The message lists every unsupported capability,
    /// one per line.
    #[error("{0}")]
    Unsupported(String),
}

/// Result type for capability operations.
pub type CapabilityResult<T> = Result<T, CapabilityError>;
