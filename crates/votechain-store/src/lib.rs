//! # Votechain Store
//!
//! Persistence boundary for the vote chain: read bytes, write bytes.
//!
//! The ledger persists the whole chain document after every durable
//! mutation. Backends implement [`ChainStore`]; shipping backends are
//! [`FileStore`] (JSON document on disk) and [`MemoryStore`] (tests).

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::ChainStore;
