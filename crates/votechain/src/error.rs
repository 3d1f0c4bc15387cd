//! Error types for the ledger.

use thiserror::Error;

use votechain_core::{CoreError, Timestamp, ValidationReport};
use votechain_store::StoreError;
use votechain_sync::SyncError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Core record/codec error (invalid value, malformed payload or chain).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Sync error. The local chain is already committed when this is
    /// raised; re-invoke push to retry.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// The chain failed invariant validation.
    #[error("chain corrupt: {}", .0.summary())]
    Corrupt(ValidationReport),

    /// The voting deadline has passed; no further votes are accepted.
    #[error("voting closed at {closed_at}")]
    VotingClosed { closed_at: Timestamp },
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
