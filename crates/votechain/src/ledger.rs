//! The Ledger: unified API over the vote chain, its storage, and sync.
//!
//! The ledger owns the only mutable chain instance, persists the chain
//! document after every durable mutation, and keeps remote sync an
//! explicit, separate step. With no gateway configured every operation
//! except push/pull works identically — offline is a first-class mode,
//! not a degraded one.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use votechain_core::{
    token, Chain, CoreError, PrevLink, Record, TallyDiff, Timestamp, TokenVerdict,
    ValidationReport, ValuePolicy,
};
use votechain_store::ChainStore;
use votechain_sync::{SyncError, SyncGateway};

use crate::error::{LedgerError, Result};

/// Configuration for the ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Validity predicate applied to vote values before any mutation.
    pub policy: ValuePolicy,
    /// Voting deadline; casts are rejected once it has passed.
    pub close_at: Option<Timestamp>,
    /// Upper bound on any single gateway call.
    pub sync_timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            policy: ValuePolicy::open(),
            close_at: None,
            sync_timeout: Duration::from_secs(10),
        }
    }
}

/// The main ledger struct.
///
/// Provides a unified API for:
/// - Casting votes (append + persist)
/// - Validating the chain and verifying scanned tokens
/// - Redaction (prune) and reset
/// - Tallying and reference-tally comparison
/// - Explicit push/pull sync
pub struct Ledger<S: ChainStore> {
    /// The chain; the write lock serializes every mutator, so a cast's
    /// read-tail/compute/push is one transaction.
    chain: RwLock<Chain>,
    /// The storage backend.
    store: Arc<S>,
    /// Optional remote gateway. `None` is offline mode.
    gateway: Option<Arc<dyn SyncGateway>>,
    /// Configuration.
    config: LedgerConfig,
}

impl<S: ChainStore> Ledger<S> {
    /// Open a ledger over the given store, loading the persisted chain
    /// document if one exists.
    pub async fn open(store: S, config: LedgerConfig) -> Result<Self> {
        let chain = match store.load().await? {
            Some(bytes) => {
                let document = String::from_utf8(bytes).map_err(|_| {
                    votechain_store::StoreError::InvalidData(
                        "chain document is not UTF-8".to_string(),
                    )
                })?;
                let mut chain = Chain::from_json(&document)?;
                chain.set_policy(config.policy.clone());
                debug!(records = chain.len(), "chain document loaded");
                chain
            }
            None => {
                debug!("no chain document found, starting empty");
                Chain::with_policy(config.policy.clone())
            }
        };

        Ok(Self {
            chain: RwLock::new(chain),
            store: Arc::new(store),
            gateway: None,
            config,
        })
    }

    /// Attach a sync gateway. Without one the ledger runs offline.
    pub fn with_gateway(mut self, gateway: Arc<dyn SyncGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Whether a gateway is configured.
    pub fn is_online(&self) -> bool {
        self.gateway.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Cast a vote: append a record and persist the chain document.
    ///
    /// Rejected before any mutation when the value fails the policy or the
    /// voting deadline has passed. The append and the persisted write
    /// happen under the write lock, so concurrent casts serialize and can
    /// never commit against the same stale tail.
    pub async fn cast(&self, value: &str) -> Result<Record> {
        if let Some(closed_at) = self.config.close_at {
            if Timestamp::now() >= closed_at {
                return Err(LedgerError::VotingClosed { closed_at });
            }
        }

        let mut chain = self.chain.write().await;
        let record = chain.append(value)?.clone();
        self.persist(&chain).await?;
        info!(value = %record.value, hash = %record.hash, "vote cast");
        Ok(record)
    }

    /// Remove every record with the given value and persist.
    ///
    /// Prune does not re-link survivors; `validate` will report the break
    /// it leaves behind. That visibility is the point.
    pub async fn prune(&self, value: &str) -> Result<usize> {
        let mut chain = self.chain.write().await;
        let removed = chain.prune(value);
        if removed > 0 {
            self.persist(&chain).await?;
            warn!(value, removed, "records pruned; chain integrity break is now visible");
        }
        Ok(removed)
    }

    /// Clear the chain and persist the empty document.
    pub async fn reset(&self) -> Result<()> {
        let mut chain = self.chain.write().await;
        chain.reset();
        self.persist(&chain).await?;
        info!("chain reset");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Observers
    // ─────────────────────────────────────────────────────────────────────

    /// Walk the chain invariants.
    pub async fn validate(&self) -> ValidationReport {
        self.chain.read().await.validate()
    }

    /// Validate and fail with [`LedgerError::Corrupt`] on any violation.
    pub async fn require_valid(&self) -> Result<ValidationReport> {
        let report = self.validate().await;
        if report.is_valid() {
            Ok(report)
        } else {
            Err(LedgerError::Corrupt(report))
        }
    }

    /// Decode a scanned token payload and verify it against the chain.
    pub async fn verify_token(&self, payload: &str) -> Result<TokenVerdict> {
        let record = token::decode(payload)?;
        Ok(self.chain.read().await.verify_record(&record))
    }

    /// Count records per value.
    pub async fn tally(&self) -> BTreeMap<String, u64> {
        self.chain.read().await.tally()
    }

    /// Compare the tally against an external reference tally.
    pub async fn compare_tally(&self, expected: &BTreeMap<String, u64>) -> TallyDiff {
        self.chain.read().await.compare_tally(expected)
    }

    /// Number of records in the chain.
    pub async fn record_count(&self) -> usize {
        self.chain.read().await.len()
    }

    /// The tail hash, or the genesis sentinel when empty.
    pub async fn last_hash(&self) -> PrevLink {
        self.chain.read().await.last_hash()
    }

    /// Snapshot of the records, in chain order.
    pub async fn records(&self) -> Vec<Record> {
        self.chain.read().await.records().to_vec()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Sync (explicit, decoupled from mutation)
    // ─────────────────────────────────────────────────────────────────────

    /// Push the current chain document to the remote. Returns the remote
    /// location identifier.
    ///
    /// The local chain is already committed and persisted before any push;
    /// a failure here loses nothing and is retryable as-is.
    pub async fn push(&self) -> Result<String> {
        let gateway = self.gateway()?;
        let document = self.chain.read().await.to_json();

        let location = self
            .with_timeout(gateway.push(document.as_bytes()))
            .await??;
        info!(%location, "chain pushed");
        Ok(location)
    }

    /// Replace the local chain with the remote document, persisting it.
    ///
    /// Returns the record count of the pulled chain, or `None` when the
    /// remote has no document (local state is left untouched).
    pub async fn pull(&self) -> Result<Option<usize>> {
        let gateway = self.gateway()?;

        let Some(bytes) = self.with_timeout(gateway.pull()).await?? else {
            debug!("remote has no chain document");
            return Ok(None);
        };

        let document = String::from_utf8(bytes)
            .map_err(|_| CoreError::MalformedChain("remote document is not UTF-8".to_string()))?;
        let mut pulled = Chain::from_json(&document)?;
        pulled.set_policy(self.config.policy.clone());
        let count = pulled.len();

        let mut chain = self.chain.write().await;
        *chain = pulled;
        self.persist(&chain).await?;
        info!(records = count, "chain replaced from remote");
        Ok(Some(count))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    async fn persist(&self, chain: &Chain) -> Result<()> {
        self.store.save(chain.to_json().as_bytes()).await?;
        Ok(())
    }

    fn gateway(&self) -> Result<&Arc<dyn SyncGateway>> {
        self.gateway.as_ref().ok_or_else(|| {
            LedgerError::Sync(SyncError::Unavailable(
                "no sync gateway configured".to_string(),
            ))
        })
    }

    async fn with_timeout<T>(
        &self,
        call: impl std::future::Future<Output = votechain_sync::Result<T>>,
    ) -> Result<votechain_sync::Result<T>> {
        tokio::time::timeout(self.config.sync_timeout, call)
            .await
            .map_err(|_| {
                LedgerError::Sync(SyncError::Unavailable("gateway call timed out".to_string()))
            })
    }
}
