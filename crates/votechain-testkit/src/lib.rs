//! # Votechain Testkit
//!
//! Testing utilities for Votechain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: deterministic chain builders and tampering helpers
//! - **Generators**: proptest strategies for values, timestamps, records
//! - **Golden vectors**: frozen hash vectors pinning the canonical encoding
//!
//! ## Golden Vectors
//!
//! ```rust
//! use votechain_testkit::vectors::verify_all_vectors;
//!
//! assert!(verify_all_vectors().is_empty());
//! ```
//!
//! ## Fixtures
//!
//! ```rust
//! use votechain_testkit::fixtures::chain_of;
//!
//! let chain = chain_of(&["A", "B", "A"]);
//! assert!(chain.validate().is_valid());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{chain_of, chain_with_allow_list, tampered_records, ts, ts_at};
pub use generators::{record_strategy, timestamp_strategy, value_strategy};
pub use vectors::{all_vectors, compute_vector, verify_all_vectors, GoldenVector};
