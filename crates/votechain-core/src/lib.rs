//! # Votechain Core
//!
//! Pure primitives for the Votechain ledger: records, the hash-linked
//! chain, and the token codec.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over a tamper-evident data structure.
//!
//! ## Key Types
//!
//! - [`Record`] - One immutable vote entry (value, timestamp, prev link, hash)
//! - [`Chain`] - The ordered, hash-linked sequence owning all mutations
//! - [`Sha256Hash`] - Content digest, hex on the wire
//! - [`PrevLink`] - Typed predecessor link (genesis sentinel or hash)
//!
//! ## Canonicalization
//!
//! Link hashes are computed over a frozen canonical encoding of the
//! committed fields. See [`canonical`].

pub mod canonical;
pub mod chain;
pub mod crypto;
pub mod error;
pub mod record;
pub mod token;
pub mod types;
pub mod validation;

pub use canonical::{hash_preimage, link_hash};
pub use chain::{Chain, TallyDiff, TokenVerdict};
pub use crypto::Sha256Hash;
pub use error::CoreError;
pub use record::{Record, ValuePolicy};
pub use types::{PrevLink, Timestamp, GENESIS_SENTINEL};
pub use validation::{validate_records, ValidationReport, Violation, Warning};
