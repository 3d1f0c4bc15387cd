//! Canonical hash-preimage encoding.
//!
//! The link hash of a record is SHA-256 over a canonical JSON rendering of
//! its committed fields:
//!
//! ```text
//! {"prev_hash": <string>, "timestamp": <string>, "value": <string>}
//! ```
//!
//! Keys in lexicographic order, `", "` and `": "` separators, RFC 8259
//! minimal string escaping (`"`, `\`, `\b`, `\f`, `\n`, `\r`, `\t`, other
//! control characters as `\u00XX`), non-ASCII passed through as UTF-8.
//!
//! This encoding is frozen. The same fields must produce identical bytes
//! (and thus identical hashes) on every platform and in every release; any
//! change breaks verification of previously issued tokens.

use crate::crypto::Sha256Hash;
use crate::types::{PrevLink, Timestamp};

/// Build the canonical hash preimage for one record.
pub fn hash_preimage(value: &str, timestamp: &Timestamp, prev_hash: &PrevLink) -> String {
    let mut out = String::with_capacity(96 + value.len());
    out.push_str("{\"prev_hash\": ");
    push_json_string(&mut out, &prev_hash.to_string());
    out.push_str(", \"timestamp\": ");
    push_json_string(&mut out, &timestamp.to_string());
    out.push_str(", \"value\": ");
    push_json_string(&mut out, value);
    out.push('}');
    out
}

/// Compute a record's link hash from its committed fields.
///
/// Pure and deterministic: depends only on the three inputs. This is the
/// single definition of the hash commitment; construction and validation
/// both go through it.
pub fn link_hash(value: &str, timestamp: &Timestamp, prev_hash: &PrevLink) -> Sha256Hash {
    Sha256Hash::hash(hash_preimage(value, timestamp, prev_hash).as_bytes())
}

/// Append a JSON string literal with minimal escaping.
fn push_json_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
