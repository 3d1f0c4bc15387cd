//! The vote chain: an ordered, hash-linked sequence of records.
//!
//! The chain exclusively owns its records. Every mutation goes through
//! `append`, `prune`, or `reset`; nothing else touches the sequence, so a
//! chain built solely through `append` satisfies every invariant by
//! construction.

use std::collections::BTreeMap;

use crate::canonical::link_hash;
use crate::crypto::Sha256Hash;
use crate::error::CoreError;
use crate::record::{Record, ValuePolicy};
use crate::types::{PrevLink, Timestamp};
use crate::validation::{validate_records, ValidationReport};

/// Outcome of verifying a decoded token record against the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerdict {
    /// The record's hash is consistent and matches a chain entry exactly.
    Verified { index: usize },
    /// The record's stored hash does not match its own fields; the token
    /// was tampered with or forged.
    ForgedHash,
    /// The record is internally consistent but its hash is not in the chain.
    NotInChain,
    /// A chain entry carries the same hash but different fields.
    ContentMismatch { index: usize },
}

impl TokenVerdict {
    /// True only for an exact, consistent chain match.
    pub fn is_verified(&self) -> bool {
        matches!(self, TokenVerdict::Verified { .. })
    }
}

/// Difference between an observed tally and an external reference tally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TallyDiff {
    /// `(value, expected, actual)` for every value where the counts differ.
    /// A value absent on one side counts as zero there.
    pub mismatches: Vec<(String, u64, u64)>,
}

impl TallyDiff {
    /// True when the tallies agree on every value.
    pub fn matches(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Ordered, hash-linked sequence of vote records.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    records: Vec<Record>,
    policy: ValuePolicy,
}

impl Chain {
    /// Create an empty chain accepting any non-empty value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty chain with a value policy.
    pub fn with_policy(policy: ValuePolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    /// Replace the value policy (e.g. after loading a persisted chain).
    pub fn set_policy(&mut self, policy: ValuePolicy) {
        self.policy = policy;
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the chain holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, in chain order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The hash of the tail record, or the genesis sentinel when empty. O(1).
    pub fn last_hash(&self) -> PrevLink {
        self.records
            .last()
            .map(|r| PrevLink::Hash(r.hash))
            .unwrap_or(PrevLink::Genesis)
    }

    /// Append a vote stamped with the current instant.
    ///
    /// Read-tail, compute, push is one logical transaction under
    /// `&mut self`; callers sharing a chain across tasks must serialize
    /// their mutable access (the ledger does this with a write lock).
    /// The stamp is clamped to the tail's timestamp so chain time never
    /// regresses through local clock skew.
    pub fn append(&mut self, value: &str) -> Result<&Record, CoreError> {
        let now = Timestamp::now();
        let stamp = match self.records.last() {
            Some(tail) if tail.timestamp > now => tail.timestamp,
            _ => now,
        };
        self.append_at(value, stamp)
    }

    /// Append a vote with an explicit timestamp (replay, deterministic tests).
    ///
    /// No clamping here; validation flags any resulting regression.
    pub fn append_at(&mut self, value: &str, timestamp: Timestamp) -> Result<&Record, CoreError> {
        self.policy.check(value)?;
        let record = Record::create(value, timestamp, self.last_hash())?;
        self.records.push(record);
        Ok(self.records.last().expect("record just pushed"))
    }

    /// Walk the chain and check invariants. Pure observer.
    pub fn validate(&self) -> ValidationReport {
        validate_records(&self.records)
    }

    /// Remove every record whose value equals `value`; returns the count.
    ///
    /// Removed records are not re-linked: the survivors keep their original
    /// prev_hash, so `validate()` reports a broken link at the position
    /// after each removal site. Redaction stays forensically visible.
    pub fn prune(&mut self, value: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.value != value);
        before - self.records.len()
    }

    /// Clear the chain. The next append starts a fresh genesis record.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Count records per value.
    pub fn tally(&self) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.value.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Compare the chain's tally against an external reference tally.
    pub fn compare_tally(&self, expected: &BTreeMap<String, u64>) -> TallyDiff {
        let actual = self.tally();
        let mut mismatches = Vec::new();
        for (value, &want) in expected {
            let got = actual.get(value).copied().unwrap_or(0);
            if got != want {
                mismatches.push((value.clone(), want, got));
            }
        }
        for (value, &got) in &actual {
            if !expected.contains_key(value) {
                mismatches.push((value.clone(), 0, got));
            }
        }
        TallyDiff { mismatches }
    }

    /// Verify a decoded token record against the chain.
    ///
    /// First recomputes the record's own link hash, then looks the hash up
    /// in the chain and compares field-for-field.
    pub fn verify_record(&self, record: &Record) -> TokenVerdict {
        if link_hash(&record.value, &record.timestamp, &record.prev_hash) != record.hash {
            return TokenVerdict::ForgedHash;
        }
        match self.find_by_hash(&record.hash) {
            Some((index, stored)) if stored == record => TokenVerdict::Verified { index },
            Some((index, _)) => TokenVerdict::ContentMismatch { index },
            None => TokenVerdict::NotInChain,
        }
    }

    /// Locate a record by hash.
    pub fn find_by_hash(&self, hash: &Sha256Hash) -> Option<(usize, &Record)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| r.hash == *hash)
    }

    /// Serialize the chain document: a pretty-printed JSON array of records
    /// in wire field order. Whole-file replace is the persistence contract.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.records).expect("records always serialize")
    }

    /// Decode a chain document produced by [`Chain::to_json`].
    ///
    /// Decoding does not validate invariants; call [`Chain::validate`] on
    /// the result when integrity matters.
    pub fn from_json(document: &str) -> Result<Self, CoreError> {
        let records: Vec<Record> = serde_json::from_str(document)
            .map_err(|e| CoreError::MalformedChain(e.to_string()))?;
        Ok(Self {
            records,
            policy: ValuePolicy::open(),
        })
    }
}
