//! # Votechain Sync
//!
//! The remote-sync boundary: push/pull one serialized chain document to a
//! remote store, whole-file replace.
//!
//! Sync is always an explicit step, decoupled from chain mutation. Local
//! appends commit before any push is attempted, so a dead remote can slow
//! nothing down and lose nothing.

pub mod error;
pub mod gateway;

pub use error::{Result, SyncError};
pub use gateway::memory::MemoryGateway;
pub use gateway::SyncGateway;
