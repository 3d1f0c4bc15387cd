//! Error types for the sync boundary.

use thiserror::Error;

/// Errors that can occur talking to a sync gateway.
///
/// Sync failures never touch local chain state: a push happens after the
/// local commit, and a failed push is retried by pushing the current
/// persisted bytes again.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote could not be reached, timed out, or rejected the call.
    /// Retryable.
    #[error("sync unavailable: {0}")]
    Unavailable(String),
}

impl SyncError {
    /// All current sync failures are safe to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Unavailable(_))
    }
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
