//! End-to-end ledger scenarios: cast, verify, prune, reset, tally, sync.

use std::collections::BTreeMap;
use std::sync::Arc;

use votechain::core::token;
use votechain::store::{FileStore, MemoryStore};
use votechain::sync::{MemoryGateway, SyncError};
use votechain::{Ledger, LedgerConfig, LedgerError, PrevLink, TokenVerdict, ValuePolicy};

async fn open_ledger() -> Ledger<MemoryStore> {
    Ledger::open(MemoryStore::new(), LedgerConfig::default())
        .await
        .expect("open ledger")
}

#[tokio::test]
async fn cast_two_votes_then_validate_and_tally() {
    let ledger = open_ledger().await;

    let first = ledger.cast("A").await.unwrap();
    assert_eq!(first.prev_hash, PrevLink::Genesis);

    let second = ledger.cast("B").await.unwrap();
    assert_eq!(second.prev_hash, PrevLink::Hash(first.hash));

    let report = ledger.validate().await;
    assert!(report.is_valid());
    assert_eq!(ledger.record_count().await, 2);

    let tally = ledger.tally().await;
    assert_eq!(tally.get("A"), Some(&1));
    assert_eq!(tally.get("B"), Some(&1));
}

#[tokio::test]
async fn token_roundtrip_verifies_against_chain() {
    let ledger = open_ledger().await;
    let record = ledger.cast("X").await.unwrap();

    let payload = token::encode(&record);
    let verdict = ledger.verify_token(&payload).await.unwrap();
    assert_eq!(verdict, TokenVerdict::Verified { index: 0 });
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let ledger = open_ledger().await;
    let mut record = ledger.cast("X").await.unwrap();

    record.value = "Y".to_string();
    let verdict = ledger.verify_token(&token::encode(&record)).await.unwrap();
    assert_eq!(verdict, TokenVerdict::ForgedHash);
}

#[tokio::test]
async fn garbage_payload_is_a_decode_error() {
    let ledger = open_ledger().await;
    let err = ledger.verify_token("not a payload").await.unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Core(votechain::core::CoreError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn prune_leaves_a_visible_break() {
    let ledger = open_ledger().await;
    for value in ["A", "B", "C"] {
        ledger.cast(value).await.unwrap();
    }

    let removed = ledger.prune("B").await.unwrap();
    assert_eq!(removed, 1);
    assert_eq!(ledger.record_count().await, 2);

    let report = ledger.validate().await;
    assert!(!report.is_valid());
    // C's prev_hash still names B's hash, so the break is at index 1.
    assert_eq!(report.violations()[0].index(), 1);
}

#[tokio::test]
async fn reset_then_cast_starts_a_fresh_genesis() {
    let ledger = open_ledger().await;
    ledger.cast("A").await.unwrap();
    ledger.cast("B").await.unwrap();

    ledger.reset().await.unwrap();
    assert_eq!(ledger.record_count().await, 0);

    let record = ledger.cast("C").await.unwrap();
    assert_eq!(record.prev_hash, PrevLink::Genesis);
    assert!(ledger.validate().await.is_valid());
}

#[tokio::test]
async fn tally_comparison_reports_differences() {
    let ledger = open_ledger().await;
    for value in ["A", "A", "B"] {
        ledger.cast(value).await.unwrap();
    }

    let expected = BTreeMap::from([("A".to_string(), 2), ("B".to_string(), 1)]);
    assert!(ledger.compare_tally(&expected).await.matches());

    let wrong = BTreeMap::from([("A".to_string(), 1), ("B".to_string(), 1)]);
    let diff = ledger.compare_tally(&wrong).await;
    assert_eq!(diff.mismatches, vec![("A".to_string(), 1, 2)]);
}

#[tokio::test]
async fn concurrent_casts_serialize_onto_one_tail() {
    let ledger = Arc::new(open_ledger().await);

    let a = {
        let ledger = Arc::clone(&ledger);
        tokio::spawn(async move { ledger.cast("A").await.unwrap() })
    };
    let b = {
        let ledger = Arc::clone(&ledger);
        tokio::spawn(async move { ledger.cast("B").await.unwrap() })
    };
    let (a, b) = (a.await.unwrap(), b.await.unwrap());

    // One of the two is genesis, the other links onto it; never both on
    // the same stale tail.
    assert_ne!(a.prev_hash, b.prev_hash);
    assert_eq!(ledger.record_count().await, 2);
    assert!(ledger.validate().await.is_valid());

    let records = ledger.records().await;
    assert_eq!(records[0].prev_hash, PrevLink::Genesis);
    assert_eq!(records[1].prev_hash, PrevLink::Hash(records[0].hash));
}

#[tokio::test]
async fn offline_ledger_supports_every_core_operation() {
    let ledger = open_ledger().await;
    assert!(!ledger.is_online());

    ledger.cast("A").await.unwrap();
    ledger.cast("B").await.unwrap();
    assert!(ledger.validate().await.is_valid());
    assert_eq!(ledger.tally().await.len(), 2);
    assert_eq!(ledger.prune("A").await.unwrap(), 1);
    ledger.reset().await.unwrap();

    // Only the explicit sync steps need a gateway.
    assert!(matches!(
        ledger.push().await.unwrap_err(),
        LedgerError::Sync(SyncError::Unavailable(_))
    ));
    assert!(matches!(
        ledger.pull().await.unwrap_err(),
        LedgerError::Sync(SyncError::Unavailable(_))
    ));
}

#[tokio::test]
async fn push_failure_keeps_local_state_and_is_retryable() {
    let gateway = Arc::new(MemoryGateway::new());
    let ledger = open_ledger().await.with_gateway(gateway.clone());

    ledger.cast("A").await.unwrap();

    gateway.set_unavailable(true);
    let err = ledger.push().await.unwrap_err();
    assert!(matches!(err, LedgerError::Sync(SyncError::Unavailable(_))));

    // The cast is still committed locally.
    assert_eq!(ledger.record_count().await, 1);

    // Retrying the same push after recovery succeeds.
    gateway.set_unavailable(false);
    let location = ledger.push().await.unwrap();
    assert!(location.starts_with("memory://"));
    assert!(gateway.document().await.is_some());
}

#[tokio::test]
async fn pull_replaces_the_local_chain() {
    let gateway = Arc::new(MemoryGateway::new());

    // One ledger pushes two votes.
    let writer = open_ledger().await.with_gateway(gateway.clone());
    writer.cast("A").await.unwrap();
    writer.cast("B").await.unwrap();
    writer.push().await.unwrap();

    // A second ledger with unrelated local state pulls the document.
    let reader = open_ledger().await.with_gateway(gateway.clone());
    reader.cast("Z").await.unwrap();
    let pulled = reader.pull().await.unwrap();
    assert_eq!(pulled, Some(2));

    assert_eq!(reader.record_count().await, 2);
    assert!(reader.validate().await.is_valid());
    let tally = reader.tally().await;
    assert!(tally.contains_key("A") && !tally.contains_key("Z"));
}

#[tokio::test]
async fn pull_from_empty_remote_leaves_local_untouched() {
    let gateway = Arc::new(MemoryGateway::new());
    let ledger = open_ledger().await.with_gateway(gateway);

    ledger.cast("A").await.unwrap();
    assert_eq!(ledger.pull().await.unwrap(), None);
    assert_eq!(ledger.record_count().await, 1);
}

#[tokio::test]
async fn allow_list_rejects_unknown_candidates_before_mutation() {
    let config = LedgerConfig {
        policy: ValuePolicy::allow_list(["YES", "NO"]),
        ..Default::default()
    };
    let ledger = Ledger::open(MemoryStore::new(), config).await.unwrap();

    ledger.cast("YES").await.unwrap();
    let err = ledger.cast("ABSTAIN").await.unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Core(votechain::core::CoreError::DisallowedValue(_))
    ));
    assert_eq!(ledger.record_count().await, 1);
}

#[tokio::test]
async fn opening_a_seeded_document_preserves_hashes() {
    use votechain_testkit::{fixtures, verify_all_vectors};

    assert!(verify_all_vectors().is_empty());

    let document = fixtures::chain_of(&["A", "B", "A"]).to_json();
    let ledger = Ledger::open(
        MemoryStore::with_document(document.into_bytes()),
        LedgerConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(ledger.record_count().await, 3);
    assert!(ledger.validate().await.is_valid());
}

#[tokio::test]
async fn chain_survives_reopen_through_a_real_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vote_chain.json");

    {
        let ledger = Ledger::open(FileStore::new(&path), LedgerConfig::default())
            .await
            .unwrap();
        ledger.cast("A").await.unwrap();
        ledger.cast("B").await.unwrap();
    }

    let reopened = Ledger::open(FileStore::new(&path), LedgerConfig::default())
        .await
        .unwrap();
    assert_eq!(reopened.record_count().await, 2);
    assert!(reopened.validate().await.is_valid());

    // Appending after reopen links onto the persisted tail.
    let record = reopened.cast("C").await.unwrap();
    assert_eq!(
        record.prev_hash,
        PrevLink::Hash(reopened.records().await[1].hash)
    );
}
