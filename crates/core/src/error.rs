//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, lookups). Storage and input-stream concerns belong elsewhere.
///
/// `NotFound`, `OutOfStock` and `InvalidResponse` are recovered locally by
/// re-prompting; they are never fatal to a session on their own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found (unmatched customer or product id).
    #[error("not found: {0}")]
    NotFound(String),

    /// A requested quantity exceeds the product's current stock.
    #[error("quantity of {requested} not available for {name} ({available} in stock)")]
    OutOfStock {
        name: String,
        requested: u32,
        available: u32,
    },

    /// A yes/no answer was not one of the recognized tokens.
    #[error("unrecognized response: {0:?}")]
    InvalidResponse(String),
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

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
