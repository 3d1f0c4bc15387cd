//! Error types for the Votechain core.

use thiserror::Error;

/// Errors from core record and codec operations.
///
/// Every variant is raised before any chain mutation; a failed operation
/// leaves the chain exactly as it was.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Vote value is empty or whitespace.
    #[error("invalid vote value: must not be empty")]
    InvalidValue,

    /// Vote value is not in the configured candidate allow-list.
    #[error("disallowed vote value: {0:?}")]
    DisallowedValue(String),

    /// Token payload could not be decoded into a record.
    #[error("malformed token payload: {0}")]
    MalformedPayload(String),

    /// Persisted chain document could not be decoded.
    #[error("malformed chain document: {0}")]
    MalformedChain(String),
}
