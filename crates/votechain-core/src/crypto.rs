//! Hashing primitives for Votechain.
//!
//! Wraps SHA-256 digests with a strong type so a record hash can never be
//! confused with arbitrary hex text.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 32-byte SHA-256 digest.
///
/// Record hashes are always lowercase hex on the wire (64 characters).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Sha256Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Sha256Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sha256Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(|_| D::Error::custom(format!("invalid hash: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let data = b"test data";
        let h1 = Sha256Hash::hash(data);
        let h2 = Sha256Hash::hash(data);
        assert_eq!(h1, h2);

        let different = b"different data";
        let h3 = Sha256Hash::hash(different);
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_hex_roundtrip() {
        let h = Sha256Hash::hash(b"roundtrip");
        let hex = h.to_hex();
        assert_eq!(hex.len(), 64);
        let recovered = Sha256Hash::from_hex(&hex).unwrap();
        assert_eq!(h, recovered);
    }

    #[test]
    fn test_from_hex_rejects_bad_length() {
        assert!(Sha256Hash::from_hex("abcd").is_err());
        assert!(Sha256Hash::from_hex("not hex at all").is_err());
    }

    #[test]
    fn test_debug_is_short() {
        let h = Sha256Hash::from_bytes([0xab; 32]);
        let debug = format!("{:?}", h);
        assert_eq!(debug, "Sha256(abababababababab)");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let h = Sha256Hash::from_bytes([0x42; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", "42".repeat(32)));
        let back: Sha256Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
