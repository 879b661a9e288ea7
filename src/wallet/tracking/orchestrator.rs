//! Wallet tracker orchestration.
//!
//! This module defines the `WalletTracker`, which connects the tracking store to an
//! indexer gateway. Commands (`add`, `remove`, `refresh`) mutate the store
//! synchronously and, where a fetch is needed, spawn a task that calls the gateway and
//! hands the result back to the store under the ticket it was issued with.
//!
//! The tracker is responsible for:
//! - Validating raw addresses before anything reaches the store or the network
//! - Issuing exactly one fetch round per `add` and per `refresh`
//! - Running the balance and transaction-summary requests of a round concurrently
//! - Turning gateway errors into per-wallet failure state instead of raised errors
//! - Publishing a revision counter so views know when to re-render
//!
//! The store sits behind a mutex that is only held for a single synchronous store
//! operation, never across an `.await`. Ordering between overlapping fetches is
//! decided by the store's ticket check, not by the lock.

use crate::config::{InputGatePolicy, TrackerConfig};
use crate::indexer::{GatewayError, LedgerGateway};
use crate::validation::WalletAddress;
use crate::wallet::tracking::{
    events::{EventDispatcher, TrackerEvent},
    stats::FetchStats,
    store::{WalletEntry, WalletTrackingStore},
};
use crate::wallet::types::{FetchOutcome, FetchTicket, TrackerError, WalletSnapshot};

use futures_util::future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Tracks a mutable list of wallets and keeps their data loaded.
///
/// Cloning is cheap; clones share the same store.
#[derive(Clone)]
pub struct WalletTracker {
    inner: Arc<TrackerInner>,
}

struct TrackerInner {
    store: Mutex<WalletTrackingStore>,
    gateway: Arc<dyn LedgerGateway>,
    dispatcher: EventDispatcher,
    revision: watch::Sender<u64>,
    config: TrackerConfig,
}

impl WalletTracker {
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        config: TrackerConfig,
        dispatcher: EventDispatcher,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        debug!(
            "Creating wallet tracker on {} with {} event handlers",
            gateway.name(),
            dispatcher.len()
        );

        Self {
            inner: Arc::new(TrackerInner {
                store: Mutex::new(WalletTrackingStore::new(config.refresh_policy)),
                gateway,
                dispatcher,
                revision,
                config,
            }),
        }
    }

    /// Start tracking a wallet.
    ///
    /// Rejects malformed input and already tracked addresses before any request is
    /// made. On success the wallet is appended in `Loading` state and its first fetch
    /// round is spawned. Must be called from within a Tokio runtime.
    pub fn add(&self, raw: &str) -> Result<WalletAddress, TrackerError> {
        let address = WalletAddress::parse(raw)?;
        let ticket = self.store().insert(address.clone())?;

        self.inner.dispatcher.dispatch(&TrackerEvent::WalletAdded {
            address: address.clone(),
            epoch: ticket.epoch,
        });
        self.bump_revision();
        self.spawn_fetch(ticket);
        Ok(address)
    }

    /// Stop tracking a wallet. Returns false if it was not tracked.
    pub fn remove(&self, raw: &str) -> bool {
        let Ok(address) = WalletAddress::parse(raw) else {
            return false;
        };
        if !self.store().remove(&address) {
            return false;
        }

        self.inner
            .dispatcher
            .dispatch(&TrackerEvent::WalletRemoved { address });
        self.bump_revision();
        true
    }

    /// Re-fetch a tracked wallet. Must be called from within a Tokio runtime.
    pub fn refresh(&self, raw: &str) -> Result<(), TrackerError> {
        let address = WalletAddress::parse(raw)?;
        let ticket = self.store().begin_refresh(&address)?;

        self.inner.dispatcher.dispatch(&TrackerEvent::RefreshStarted {
            address,
            epoch: ticket.epoch,
        });
        self.bump_revision();
        self.spawn_fetch(ticket);
        Ok(())
    }

    pub fn is_any_loading(&self) -> bool {
        self.store().is_any_loading()
    }

    /// Whether a view should currently accept new wallet submissions.
    pub fn accepts_new_wallets(&self) -> bool {
        match self.inner.config.input_gate {
            InputGatePolicy::WhileAnyLoading => !self.is_any_loading(),
            InputGatePolicy::AlwaysOpen => true,
        }
    }

    /// A copy of every entry, in insertion order.
    pub fn wallets(&self) -> Vec<WalletEntry> {
        self.store().entries().to_vec()
    }

    pub fn wallet(&self, raw: &str) -> Option<WalletEntry> {
        let address = WalletAddress::parse(raw).ok()?;
        self.store().get(&address).cloned()
    }

    pub fn stats(&self) -> FetchStats {
        self.store().stats()
    }

    /// Receiver that changes whenever visible state changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Resolve once no tracked wallet is loading.
    pub async fn wait_until_settled(&self) {
        let mut revisions = self.subscribe();
        while self.is_any_loading() {
            if revisions.changed().await.is_err() {
                return;
            }
        }
    }

    fn store(&self) -> MutexGuard<'_, WalletTrackingStore> {
        // The store is left consistent by every operation, so a poisoned lock is still usable.
        self.inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn bump_revision(&self) {
        self.inner.revision.send_modify(|revision| *revision += 1);
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let tracker = self.clone();
        tokio::spawn(async move {
            let result = tracker.fetch_snapshot(ticket.address.as_str()).await;
            tracker.complete(ticket, result);
        });
    }

    /// Run one fetch round against the gateway.
    ///
    /// A transaction-summary failure does not fail the round; the snapshot simply
    /// carries no summary.
    async fn fetch_snapshot(&self, address: &str) -> Result<WalletSnapshot, GatewayError> {
        let gateway = &self.inner.gateway;

        if !self.inner.config.include_transactions {
            let balances = gateway.fetch_balances(address).await?;
            return Ok(WalletSnapshot {
                balances,
                transactions: None,
            });
        }

        let (balances, transactions) = future::join(
            gateway.fetch_balances(address),
            gateway.fetch_transaction_summary(address),
        )
        .await;

        let transactions = transactions
            .map_err(|e| {
                warn!("Transaction summary unavailable for {}: {}", address, e);
            })
            .ok();

        Ok(WalletSnapshot {
            balances: balances?,
            transactions,
        })
    }

    fn complete(&self, ticket: FetchTicket, result: Result<WalletSnapshot, GatewayError>) {
        let address = ticket.address.clone();
        let epoch = ticket.epoch;

        let (outcome, applied_event) = match result {
            Ok(snapshot) => {
                let token_count = snapshot.balances.items.len();
                let outcome = self.store().on_fetch_succeeded(&ticket, snapshot);
                let event = TrackerEvent::FetchApplied {
                    address: address.clone(),
                    epoch,
                    token_count,
                };
                (outcome, event)
            }
            Err(e) => {
                let message = e.to_string();
                let outcome = self.store().on_fetch_failed(&ticket, message.clone());
                let event = TrackerEvent::FetchFailed {
                    address: address.clone(),
                    epoch,
                    message,
                };
                (outcome, event)
            }
        };

        match outcome {
            FetchOutcome::Applied => {
                self.inner.dispatcher.dispatch(&applied_event);
                self.bump_revision();
            }
            FetchOutcome::Discarded(reason) => {
                self.inner.dispatcher.dispatch(&TrackerEvent::FetchDiscarded {
                    address,
                    epoch,
                    reason,
                });
            }
        }
    }
}
