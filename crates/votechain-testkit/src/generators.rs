//! Proptest strategies for property-based testing.

use proptest::prelude::*;

use votechain_core::{PrevLink, Record, Sha256Hash, Timestamp};

/// Vote values: non-empty printable strings with at least one
/// non-whitespace character, including quotes and backslashes to exercise
/// the canonical escaping.
pub fn value_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,15}[!-~][ -~]{0,15}"
}

/// Wire-format timestamps across a wide range of instants.
pub fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
    (
        2000u32..2100,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        0u32..60,
        0u32..1_000_000,
    )
        .prop_map(|(y, mo, d, h, mi, s, us)| {
            Timestamp::parse(&format!(
                "{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}.{us:06}"
            ))
            .expect("generated timestamp is well-formed")
        })
}

/// Predecessor links: genesis or an arbitrary hash.
pub fn prev_link_strategy() -> impl Strategy<Value = PrevLink> {
    prop_oneof![
        Just(PrevLink::Genesis),
        any::<[u8; 32]>().prop_map(|b| PrevLink::Hash(Sha256Hash::from_bytes(b))),
    ]
}

/// Well-formed records (hash computed from the generated fields).
pub fn record_strategy() -> impl Strategy<Value = Record> {
    (value_strategy(), timestamp_strategy(), prev_link_strategy()).prop_map(
        |(value, timestamp, prev)| {
            Record::create(value, timestamp, prev).expect("generated value is non-empty")
        },
    )
}
