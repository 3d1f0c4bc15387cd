//! Record: one immutable entry of the vote chain.
//!
//! A record commits to its value, its creation instant, and its
//! predecessor's hash. Once created it is never edited; redaction is a
//! chain operation with visible consequences, not a record mutation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::canonical::link_hash;
use crate::crypto::Sha256Hash;
use crate::error::CoreError;
use crate::types::{PrevLink, Timestamp};

/// One vote record.
///
/// Field order is the wire order of both the persisted chain document and
/// the token payload; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The vote value (candidate identifier). Never empty.
    pub value: String,

    /// Creation instant, non-decreasing across a well-formed chain.
    pub timestamp: Timestamp,

    /// Hash of the physical predecessor, or the genesis sentinel.
    pub prev_hash: PrevLink,

    /// SHA-256 over the canonical (value, timestamp, prev_hash) preimage.
    pub hash: Sha256Hash,
}

impl Record {
    /// Construct a record, computing its hash from the committed fields.
    ///
    /// Rejects empty (or whitespace-only) values before anything else; a
    /// record with an invalid value is unrepresentable.
    pub fn create(
        value: impl Into<String>,
        timestamp: Timestamp,
        prev_hash: PrevLink,
    ) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::InvalidValue);
        }
        let hash = link_hash(&value, &timestamp, &prev_hash);
        Ok(Self {
            value,
            timestamp,
            prev_hash,
            hash,
        })
    }

    /// Recompute the link hash and compare it to the stored one.
    pub fn hash_is_consistent(&self) -> bool {
        link_hash(&self.value, &self.timestamp, &self.prev_hash) == self.hash
    }

    /// Whether this record claims to be a chain's first entry.
    pub fn is_genesis(&self) -> bool {
        self.prev_hash.is_genesis()
    }
}

/// Externally supplied validity predicate for vote values.
///
/// With no allow-list configured every non-empty value is accepted; the
/// core stays value-agnostic.
#[derive(Debug, Clone, Default)]
pub struct ValuePolicy {
    allowed: Option<BTreeSet<String>>,
}

impl ValuePolicy {
    /// Accept any non-empty value.
    pub fn open() -> Self {
        Self { allowed: None }
    }

    /// Accept only the given candidate values.
    pub fn allow_list<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Some(candidates.into_iter().map(Into::into).collect()),
        }
    }

    /// Check a value against the policy.
    pub fn check(&self, value: &str) -> Result<(), CoreError> {
        if value.trim().is_empty() {
            return Err(CoreError::InvalidValue);
        }
        if let Some(allowed) = &self.allowed {
            if !allowed.contains(value) {
                return Err(CoreError::DisallowedValue(value.to_string()));
            }
        }
        Ok(())
    }
}
