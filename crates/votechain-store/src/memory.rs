//! In-memory implementation of the ChainStore trait.
//!
//! This is primarily for testing. Same semantics as the file store but
//! nothing survives a drop.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::ChainStore;

/// In-memory store implementation. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<Option<Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a document.
    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: RwLock::new(Some(document.into())),
        }
    }
}

#[async_trait]
impl ChainStore for MemoryStore {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.document.read().expect("store lock poisoned").clone())
    }

    async fn save(&self, document: &[u8]) -> Result<()> {
        *self.document.write().expect("store lock poisoned") = Some(document.to_vec());
        Ok(())
    }
}
