//! Strong type definitions for Votechain.
//!
//! The genesis sentinel and the wire timestamp format live here so that
//! invalid link or timestamp states are unrepresentable.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::crypto::Sha256Hash;
use crate::error::CoreError;

/// The reserved predecessor-hash literal for the first record in a chain.
pub const GENESIS_SENTINEL: &str = "genesis_hash";

/// Wire format for timestamps: ISO-8601-like UTC with microsecond precision.
///
/// The formatted string is part of the hash commitment. Changing it breaks
/// verification of previously issued tokens.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// The predecessor link of a record: either the genesis sentinel or the
/// hash of the immediately preceding record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrevLink {
    /// First record in the chain.
    Genesis,
    /// Hash of the physical predecessor.
    Hash(Sha256Hash),
}

impl PrevLink {
    /// Check whether this is the genesis sentinel.
    pub fn is_genesis(&self) -> bool {
        matches!(self, PrevLink::Genesis)
    }

    /// Get the predecessor hash, if any.
    pub fn as_hash(&self) -> Option<&Sha256Hash> {
        match self {
            PrevLink::Genesis => None,
            PrevLink::Hash(h) => Some(h),
        }
    }
}

impl fmt::Display for PrevLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrevLink::Genesis => f.write_str(GENESIS_SENTINEL),
            PrevLink::Hash(h) => write!(f, "{}", h.to_hex()),
        }
    }
}

impl FromStr for PrevLink {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == GENESIS_SENTINEL {
            return Ok(PrevLink::Genesis);
        }
        Sha256Hash::from_hex(s)
            .map(PrevLink::Hash)
            .map_err(|_| CoreError::MalformedChain(format!("invalid prev_hash: {s:?}")))
    }
}

impl From<Sha256Hash> for PrevLink {
    fn from(hash: Sha256Hash) -> Self {
        PrevLink::Hash(hash)
    }
}

impl Serialize for PrevLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PrevLink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// A record creation instant: UTC, truncated to microsecond precision.
///
/// Microsecond truncation keeps the in-memory value identical to its wire
/// form, so encode/decode round trips are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The current instant, truncated to microseconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Build from a UTC datetime, truncating to microseconds.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let naive = dt.naive_utc();
        let micros = naive.nanosecond() / 1_000 * 1_000;
        Self(naive.with_nanosecond(micros).unwrap_or(naive))
    }

    /// Parse from the wire format.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|_| CoreError::MalformedChain(format!("invalid timestamp: {s:?}")))
    }

    /// The underlying UTC datetime.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0.and_utc()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_prev_link_genesis_roundtrip() {
        let link = PrevLink::Genesis;
        assert_eq!(link.to_string(), "genesis_hash");
        let back: PrevLink = "genesis_hash".parse().unwrap();
        assert_eq!(back, link);
        assert!(back.is_genesis());
        assert!(back.as_hash().is_none());
    }

    #[test]
    fn test_prev_link_hash_roundtrip() {
        let hash = Sha256Hash::from_bytes([0x5a; 32]);
        let link = PrevLink::Hash(hash);
        let s = link.to_string();
        assert_eq!(s.len(), 64);
        let back: PrevLink = s.parse().unwrap();
        assert_eq!(back.as_hash(), Some(&hash));
    }

    #[test]
    fn test_prev_link_rejects_garbage() {
        assert!("".parse::<PrevLink>().is_err());
        assert!("Genesis_Hash".parse::<PrevLink>().is_err());
        assert!("deadbeef".parse::<PrevLink>().is_err());
    }

    #[test]
    fn test_timestamp_wire_format() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 25, 13, 52, 0).unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.to_string(), "2025-06-25T13:52:00.000000");
    }

    #[test]
    fn test_timestamp_parse_roundtrip() {
        let ts = Timestamp::parse("2025-06-25T13:52:00.123456").unwrap();
        assert_eq!(ts.to_string(), "2025-06-25T13:52:00.123456");
    }

    #[test]
    fn test_timestamp_now_roundtrips_exactly() {
        let ts = Timestamp::now();
        let back = Timestamp::parse(&ts.to_string()).unwrap();
        assert_eq!(ts, back);
    }

    #[test]
    fn test_timestamp_truncates_nanos() {
        let dt = Utc.timestamp_opt(1_750_000_000, 123_456_789).unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert!(ts.to_string().ends_with(".123456"));
    }

    #[test]
    fn test_timestamp_rejects_other_formats() {
        assert!(Timestamp::parse("2025-06-25 13:52:00").is_err());
        assert!(Timestamp::parse("2025-06-25T13:52:00Z").is_err());
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_timestamp_ordering() {
        let a = Timestamp::parse("2025-06-25T13:52:00.000000").unwrap();
        let b = Timestamp::parse("2025-06-25T13:52:00.000001").unwrap();
        assert!(a < b);
    }
}
