//! Failures a storefront operation can report to its caller.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Why a product, cart or upload operation was refused.
///
/// Every variant leaves state unchanged. Persistence failures never appear
/// here; the stores log them and keep their in-memory state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed input: a blank upload field, a negative price,
    /// a sold-out print added to the cart.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request would break the layer rules, e.g. replacing print `"3"`
    /// with a record whose id is `"4"`.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No print with that id in the merged list.
    #[error("not found")]
    NotFound,

    /// The id is already taken by a catalog print or an earlier upload.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
