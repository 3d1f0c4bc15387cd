//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: deterministic chains and
//! tampering helpers for exercising validation.

use votechain_core::{Chain, Record, Timestamp, ValuePolicy};

/// Timestamp of the first fixture record; later records step one second.
pub const BASE_TIMESTAMP: &str = "2025-06-25T13:52:00.000000";

/// Parse a wire-format timestamp, panicking on bad input (test-only).
pub fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).expect("fixture timestamp")
}

/// The fixture timestamp `offset` seconds after [`BASE_TIMESTAMP`].
pub fn ts_at(offset: u32) -> Timestamp {
    assert!(offset < 60, "fixtures stay within one minute");
    ts(&format!("2025-06-25T13:52:{offset:02}.000000"))
}

/// Build a chain by appending the given values at one-second intervals.
pub fn chain_of(values: &[&str]) -> Chain {
    let mut chain = Chain::new();
    for (i, value) in values.iter().enumerate() {
        chain
            .append_at(value, ts_at(i as u32))
            .expect("fixture append");
    }
    chain
}

/// Build a chain restricted to an allow-list.
pub fn chain_with_allow_list(values: &[&str], allowed: &[&str]) -> Chain {
    let mut chain = Chain::with_policy(ValuePolicy::allow_list(allowed.iter().copied()));
    for (i, value) in values.iter().enumerate() {
        chain
            .append_at(value, ts_at(i as u32))
            .expect("fixture append");
    }
    chain
}

/// A copy of the chain's records with one record's value overwritten,
/// without recomputing hashes. For feeding validation a tampered sequence.
pub fn tampered_records(chain: &Chain, index: usize, new_value: &str) -> Vec<Record> {
    let mut records = chain.records().to_vec();
    records[index].value = new_value.to_string();
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_of_is_valid() {
        let chain = chain_of(&["A", "B", "C"]);
        assert_eq!(chain.len(), 3);
        assert!(chain.validate().is_valid());
    }

    #[test]
    fn test_ts_at_steps_seconds() {
        assert_eq!(ts_at(0), ts(BASE_TIMESTAMP));
        assert!(ts_at(1) > ts_at(0));
    }

    #[test]
    fn test_tampered_records_fail_validation() {
        let chain = chain_of(&["A", "B"]);
        let records = tampered_records(&chain, 0, "Z");
        assert!(!votechain_core::validate_records(&records).is_valid());
    }
}
