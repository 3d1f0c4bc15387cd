//! Golden hash vectors.
//!
//! These pin the canonical preimage encoding across releases: the same
//! committed fields must hash to the same digest forever, or previously
//! issued tokens stop verifying. Every implementation change that touches
//! canonicalization must leave these untouched.

use votechain_core::{link_hash, PrevLink, Sha256Hash, Timestamp};

/// A single golden hash vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    pub name: &'static str,
    /// Committed fields.
    pub value: &'static str,
    pub timestamp: &'static str,
    /// Wire form of the predecessor link (sentinel or hex).
    pub prev_hash: &'static str,
    /// Expected SHA-256, lowercase hex.
    pub expected: &'static str,
}

/// All golden vectors. The second chains onto the first, the third onto
/// the second, so link composition is pinned as well as single hashes.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis",
            value: "A",
            timestamp: "2025-06-25T13:52:00.000000",
            prev_hash: "genesis_hash",
            expected: "27beee3ae930992f94aed84145b2eaa4d02d23f1754022539390bcc785eec879",
        },
        GoldenVector {
            name: "second-link",
            value: "B",
            timestamp: "2025-06-25T13:53:00.000000",
            prev_hash: "27beee3ae930992f94aed84145b2eaa4d02d23f1754022539390bcc785eec879",
            expected: "5100011d7f003bcee2cf9317751c652ae19e8f7a257c71fef454976f9998217b",
        },
        GoldenVector {
            name: "escaped-value",
            value: "tie \"A\"/B",
            timestamp: "2025-06-25T13:54:00.500000",
            prev_hash: "5100011d7f003bcee2cf9317751c652ae19e8f7a257c71fef454976f9998217b",
            expected: "3d9efc76379e1a67d1a1ea102c06053b3c9d5317f3772fc2f0a0d31c6696aa52",
        },
        GoldenVector {
            name: "single-microsecond",
            value: "YES",
            timestamp: "2024-01-01T00:00:00.000001",
            prev_hash: "genesis_hash",
            expected: "f658254d5ef2e2c5cc82b5d90b5fa41ad54b021de417f5b01d480ce45a255dc2",
        },
    ]
}

/// Compute the link hash for a vector's inputs.
pub fn compute_vector(vector: &GoldenVector) -> Sha256Hash {
    let timestamp = Timestamp::parse(vector.timestamp).expect("vector timestamp");
    let prev: PrevLink = vector.prev_hash.parse().expect("vector prev_hash");
    link_hash(vector.value, &timestamp, &prev)
}

/// Check every vector; returns the names of any that fail.
pub fn verify_all_vectors() -> Vec<&'static str> {
    all_vectors()
        .iter()
        .filter(|v| compute_vector(v).to_hex() != v.expected)
        .map(|v| v.name)
        .collect()
}
