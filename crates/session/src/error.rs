//! Session error model.

use thiserror::Error;

use orderdesk_core::DomainError;
use orderdesk_store::StoreError;

/// Result type used across the session layer.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that end a session.
///
/// Recoverable domain errors (unknown id, bad quantity, unrecognized yes/no
/// token) are consumed by the prompt loops and never surface here; what
/// does surface is fatal: the input stream is gone, a configured retry
/// budget is spent, persistence failed, or a domain invariant broke.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console failure: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream reached end-of-file mid-session.
    #[error("input stream closed")]
    InputClosed,

    /// The configured retry budget was spent without a valid answer.
    #[error("no valid answer after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// Persistence failure; nothing from the session was committed.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
