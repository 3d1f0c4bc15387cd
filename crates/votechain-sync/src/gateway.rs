//! SyncGateway abstraction: push/pull the serialized chain document.
//!
//! The gateway is a pure boundary. It moves opaque bytes to and from one
//! remote document (whole-file replace, no schema knowledge) and carries
//! no business logic. Concrete remotes (a hosted-document store, an HTTP
//! endpoint) implement this trait; the ledger never depends on a specific
//! one, and running with no gateway at all is a first-class configuration.

use async_trait::async_trait;

use crate::error::Result;

/// Gateway trait for syncing the chain document with a remote store.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait SyncGateway: Send + Sync {
    /// Fetch the remote chain document.
    ///
    /// Returns `None` when the remote has no document yet; that is an
    /// empty remote, not an error.
    async fn pull(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the remote chain document.
    ///
    /// Returns a location identifier for the stored document (a URL or
    /// similar handle, implementation-defined).
    async fn push(&self, document: &[u8]) -> Result<String>;
}

/// A simple in-memory gateway for testing.
///
/// Holds one document slot and can be switched into an unavailable mode to
/// exercise failure handling.
pub mod memory {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    /// In-memory gateway implementation.
    #[derive(Debug, Default)]
    pub struct MemoryGateway {
        document: RwLock<Option<Vec<u8>>>,
        unavailable: AtomicBool,
    }

    impl MemoryGateway {
        /// Create an empty, reachable gateway.
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every call fail with [`SyncError::Unavailable`] until
        /// switched back.
        ///
        /// [`SyncError::Unavailable`]: crate::error::SyncError::Unavailable
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// The current remote document, for assertions.
        pub async fn document(&self) -> Option<Vec<u8>> {
            self.document.read().await.clone()
        }

        fn check_reachable(&self) -> Result<()> {
            if self.unavailable.load(Ordering::SeqCst) {
                Err(crate::error::SyncError::Unavailable(
                    "gateway offline".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl SyncGateway for MemoryGateway {
        async fn pull(&self) -> Result<Option<Vec<u8>>> {
            self.check_reachable()?;
            Ok(self.document.read().await.clone())
        }

        async fn push(&self, document: &[u8]) -> Result<String> {
            self.check_reachable()?;
            *self.document.write().await = Some(document.to_vec());
            Ok("memory://vote_chain.json".to_string())
        }
    }
}
