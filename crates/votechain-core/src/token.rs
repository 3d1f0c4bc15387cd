//! Token codec: one record in, one opaque scannable payload out.
//!
//! A token payload is the compact JSON rendering of a single record's four
//! wire fields, wrapped in standard base64 so the external optical codec
//! only ever sees ASCII. Decoding reconstructs the record; it does not
//! verify hashes — that is [`crate::chain::Chain::verify_record`]'s job.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::CoreError;
use crate::record::Record;

/// Encode one record into a token payload. Total for well-formed records.
pub fn encode(record: &Record) -> String {
    let json = serde_json::to_string(record).expect("records always serialize");
    STANDARD.encode(json.as_bytes())
}

/// Render one record as indented JSON, for terminal display.
///
/// Not the payload format; tokens use the compact rendering inside base64.
pub fn record_json_pretty(record: &Record) -> String {
    serde_json::to_string_pretty(record).expect("records always serialize")
}

/// Decode a token payload back into a record.
///
/// Fails with [`CoreError::MalformedPayload`] on anything structurally
/// invalid: bad base64, non-UTF-8 content, or JSON that is not a four-field
/// record.
pub fn decode(payload: &str) -> Result<Record, CoreError> {
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| CoreError::MalformedPayload(format!("invalid base64: {e}")))?;
    let json = String::from_utf8(bytes)
        .map_err(|_| CoreError::MalformedPayload("payload is not UTF-8".to_string()))?;
    serde_json::from_str(&json)
        .map_err(|e| CoreError::MalformedPayload(format!("invalid record: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrevLink, Timestamp};

    fn sample_record() -> Record {
        Record::create(
            "X",
            Timestamp::parse("2025-06-25T13:52:00.000000").unwrap(),
            PrevLink::Genesis,
        )
        .unwrap()
    }

    #[test]
    fn test_roundtrip_is_exact() {
        let record = sample_record();
        let payload = encode(&record);
        let decoded = decode(&payload).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_payload_is_ascii() {
        let record = Record::create(
            "Ωmega",
            Timestamp::parse("2025-06-25T13:52:00.000000").unwrap(),
            PrevLink::Genesis,
        )
        .unwrap();
        let payload = encode(&record);
        assert!(payload.is_ascii());
        assert_eq!(decode(&payload).unwrap(), record);
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        let payload = format!("  {}\n", encode(&sample_record()));
        assert!(decode(&payload).is_ok());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(matches!(
            decode("!!!not-base64!!!"),
            Err(CoreError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_record_json() {
        let payload = STANDARD.encode(b"{\"vote\": \"A\"}");
        assert!(matches!(
            decode(&payload),
            Err(CoreError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        let payload = STANDARD.encode([0xff, 0xfe, 0x80]);
        assert!(matches!(
            decode(&payload),
            Err(CoreError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_decode_does_not_check_hashes() {
        let mut record = sample_record();
        record.value = "tampered".to_string();
        // Decode succeeds; catching the forgery is the chain's job.
        let decoded = decode(&encode(&record)).unwrap();
        assert!(!decoded.hash_is_consistent());
    }
}
