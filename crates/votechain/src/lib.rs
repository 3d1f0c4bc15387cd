//! # Votechain
//!
//! A tamper-evident, hash-linked, append-only vote ledger.
//!
//! ## Overview
//!
//! Every vote is an immutable record committing to its predecessor's hash;
//! the chain as a whole is verifiable at any time, and any redaction leaves
//! a detectable break instead of a silent repair.
//!
//! - **Record**: one vote (value, timestamp, predecessor hash, own hash)
//! - **Chain**: the ordered sequence; append, validate, prune, reset, tally
//! - **Token**: a single record encoded for an external scannable medium
//! - **Store**: whole-document persistence (file or memory)
//! - **Gateway**: optional remote push/pull; offline is first-class
//!
//! ## Usage
//!
//! ```rust,no_run
//! use votechain::{Ledger, LedgerConfig};
//! use votechain::store::FileStore;
//!
//! async fn example() {
//!     let store = FileStore::new("vote_chain.json");
//!     let ledger = Ledger::open(store, LedgerConfig::default()).await.unwrap();
//!
//!     let record = ledger.cast("Candidate A").await.unwrap();
//!     let payload = votechain::core::token::encode(&record);
//!     println!("token payload: {payload}");
//!
//!     let report = ledger.validate().await;
//!     assert!(report.is_valid());
//! }
//! ```

pub mod error;
pub mod ledger;

// Re-export component crates
pub use votechain_core as core;
pub use votechain_store as store;
pub use votechain_sync as sync;

// Re-export main types for convenience
pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig};

// Re-export commonly used core types
pub use votechain_core::{
    Chain, PrevLink, Record, Sha256Hash, TallyDiff, Timestamp, TokenVerdict, ValidationReport,
    ValuePolicy, GENESIS_SENTINEL,
};
