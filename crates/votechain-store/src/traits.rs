//! ChainStore trait: the abstract interface for chain persistence.
//!
//! The store sees opaque bytes only — the whole persisted chain document,
//! read and replaced in one piece. It knows nothing about records, hashes,
//! or the document schema; that keeps the ledger storage-agnostic and the
//! backends trivial to swap (file for production, memory for tests).

use async_trait::async_trait;

use crate::error::Result;

/// Async interface for whole-document chain persistence.
///
/// # Contract
///
/// - `load` returns `None` when no document has ever been saved; an absent
///   document is an empty chain, not an error.
/// - `save` replaces the whole document atomically from the reader's point
///   of view: a concurrent `load` sees either the old bytes or the new
///   ones, never a mix.
#[async_trait]
pub trait ChainStore: Send + Sync {
    /// Read the persisted chain document, if any.
    async fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the persisted chain document.
    async fn save(&self, document: &[u8]) -> Result<()>;
}
