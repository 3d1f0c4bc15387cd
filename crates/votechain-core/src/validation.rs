//! Chain validation: the invariant walk.
//!
//! Validation never mutates and never repairs. It reports every violation
//! with the index it occurred at, so a broken chain is debuggable (and a
//! pruned chain shows exactly where the redaction happened).

use std::collections::HashMap;
use thiserror::Error;

use crate::crypto::Sha256Hash;
use crate::record::Record;
use crate::types::PrevLink;

/// A violated chain invariant, anchored to the record index it was found at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A record's prev_hash does not match its physical predecessor's hash.
    #[error("record {index}: prev_hash {found} does not match predecessor hash {expected}")]
    BrokenLink {
        index: usize,
        expected: Sha256Hash,
        found: PrevLink,
    },

    /// A record's stored hash does not match its recomputed link hash.
    #[error("record {index}: stored hash {found} does not match recomputed hash {expected}")]
    HashMismatch {
        index: usize,
        expected: Sha256Hash,
        found: Sha256Hash,
    },

    /// The first record does not carry the genesis sentinel.
    #[error("record 0: expected the genesis sentinel, found prev_hash {found}")]
    MissingGenesis { found: Sha256Hash },

    /// A record other than the first carries the genesis sentinel.
    #[error("record {index}: genesis sentinel reused past the first record")]
    UnexpectedGenesis { index: usize },

    /// The same hash appears twice in the chain.
    #[error("record {index}: hash already present at record {first_index}")]
    DuplicateHash { index: usize, first_index: usize },
}

impl Violation {
    /// The record index the violation is anchored to.
    pub fn index(&self) -> usize {
        match self {
            Violation::BrokenLink { index, .. }
            | Violation::HashMismatch { index, .. }
            | Violation::UnexpectedGenesis { index }
            | Violation::DuplicateHash { index, .. } => *index,
            Violation::MissingGenesis { .. } => 0,
        }
    }
}

/// A non-fatal observation from the invariant walk.
///
/// Timestamp ordering is not part of the hash commitment, so regressions
/// are reported but do not make the chain invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// A record's timestamp precedes its predecessor's.
    #[error("record {index}: timestamp precedes the previous record (clock skew or reordering)")]
    TimestampRegression { index: usize },
}

/// Outcome of a full invariant walk.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    violations: Vec<Violation>,
    warnings: Vec<Warning>,
}

impl ValidationReport {
    /// True when no invariant is violated (warnings do not count).
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violations, in chain order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The warnings, in chain order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            match self.warnings.len() {
                0 => "chain is valid".to_string(),
                n => format!("chain is valid ({n} warning(s))"),
            }
        } else {
            format!(
                "chain is corrupt: {} violation(s), {} warning(s)",
                self.violations.len(),
                self.warnings.len()
            )
        }
    }
}

/// Walk a record sequence and check every chain invariant.
///
/// Checked per record: the recomputed link hash matches the stored hash,
/// the genesis sentinel appears exactly at index 0, each prev_hash matches
/// the physical predecessor's hash, and no hash repeats.
pub fn validate_records(records: &[Record]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen: HashMap<Sha256Hash, usize> = HashMap::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if !record.hash_is_consistent() {
            report.violations.push(Violation::HashMismatch {
                index,
                expected: crate::canonical::link_hash(
                    &record.value,
                    &record.timestamp,
                    &record.prev_hash,
                ),
                found: record.hash,
            });
        }

        if index == 0 {
            if let PrevLink::Hash(found) = record.prev_hash {
                report.violations.push(Violation::MissingGenesis { found });
            }
        } else {
            let predecessor = &records[index - 1];

            if record.prev_hash.is_genesis() {
                report
                    .violations
                    .push(Violation::UnexpectedGenesis { index });
            }

            if record.prev_hash != PrevLink::Hash(predecessor.hash) {
                report.violations.push(Violation::BrokenLink {
                    index,
                    expected: predecessor.hash,
                    found: record.prev_hash,
                });
            }

            if record.timestamp < predecessor.timestamp {
                report
                    .warnings
                    .push(Warning::TimestampRegression { index });
            }
        }

        if let Some(&first_index) = seen.get(&record.hash) {
            report
                .violations
                .push(Violation::DuplicateHash { index, first_index });
        } else {
            seen.insert(record.hash, index);
        }
    }

    report
}
