//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

use wallet_tracker::indexer::{
    BalanceSnapshot, GatewayError, LedgerGateway, TokenBalance, TransactionSummary,
    TransactionSummaryItem,
};
use wallet_tracker::wallet::{TrackerEvent, TrackerEventHandler};

pub const WALLET_A: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const WALLET_B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

pub fn token(symbol: &str, quote: f64) -> TokenBalance {
    TokenBalance {
        contract_decimals: 18,
        contract_name: format!("{} Token", symbol),
        contract_ticker_symbol: symbol.to_string(),
        contract_address: format!("0x{:0>40}", symbol.len()),
        supports_erc: Some(vec!["erc20".to_string()]),
        logo_url: String::new(),
        balance: "2500000000000000000".to_string(),
        balance_24h: None,
        quote,
        quote_24h: None,
        pretty_quote: None,
    }
}

pub fn balances(address: &str, items: Vec<TokenBalance>) -> BalanceSnapshot {
    BalanceSnapshot {
        address: address.to_lowercase(),
        updated_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        next_update_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 5, 0).unwrap()),
        quote_currency: "USD".to_string(),
        chain_id: 999,
        chain_name: "hyperevm-mainnet".to_string(),
        items,
    }
}

pub fn summary(address: &str, total_count: u64) -> TransactionSummary {
    TransactionSummary {
        address: address.to_lowercase(),
        updated_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        chain_id: 999,
        chain_name: "hyperevm-mainnet".to_string(),
        items: vec![TransactionSummaryItem {
            total_count,
            latest_transaction: None,
            earliest_transaction: None,
            gas_summary: None,
        }],
    }
}

/// A balance request waiting for the test to answer it.
pub struct PendingBalance {
    pub address: String,
    responder: oneshot::Sender<Result<BalanceSnapshot, GatewayError>>,
}

impl PendingBalance {
    pub fn succeed(self, items: Vec<TokenBalance>) {
        let snapshot = balances(&self.address, items);
        let _ = self.responder.send(Ok(snapshot));
    }

    pub fn fail(self, error: GatewayError) {
        let _ = self.responder.send(Err(error));
    }
}

/// Gateway whose balance calls block until the test answers them, so completion
/// order is fully under test control. Transaction summaries answer immediately.
pub struct ScriptedGateway {
    pending: mpsc::UnboundedSender<PendingBalance>,
    summary_error: Mutex<Option<String>>,
    balance_calls: AtomicUsize,
    summary_calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingBalance>) {
        let (pending, receiver) = mpsc::unbounded_channel();
        let gateway = Self {
            pending,
            summary_error: Mutex::new(None),
            balance_calls: AtomicUsize::new(0),
            summary_calls: AtomicUsize::new(0),
        };
        (gateway, receiver)
    }

    /// Make every transaction-summary call fail with `message`.
    pub fn fail_summaries(&self, message: &str) {
        *self.summary_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LedgerGateway for ScriptedGateway {
    async fn fetch_balances(&self, address: &str) -> Result<BalanceSnapshot, GatewayError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        let (responder, response) = oneshot::channel();
        self.pending
            .send(PendingBalance {
                address: address.to_string(),
                responder,
            })
            .map_err(|_| GatewayError::NoData)?;
        response.await.unwrap_or(Err(GatewayError::NoData))
    }

    async fn fetch_transaction_summary(
        &self,
        address: &str,
    ) -> Result<TransactionSummary, GatewayError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        match self.summary_error.lock().unwrap().clone() {
            Some(message) => Err(GatewayError::upstream(Some(500), message)),
            None => Ok(summary(address, 12)),
        }
    }

    fn name(&self) -> &'static str {
        "ScriptedGateway"
    }
}

/// Gateway with canned answers for route tests.
pub struct StaticGateway {
    pub balances: fn(&str) -> Result<BalanceSnapshot, GatewayError>,
    pub summary: fn(&str) -> Result<TransactionSummary, GatewayError>,
    pub calls: AtomicUsize,
}

impl StaticGateway {
    pub fn new(
        balances: fn(&str) -> Result<BalanceSnapshot, GatewayError>,
        summary: fn(&str) -> Result<TransactionSummary, GatewayError>,
    ) -> Self {
        Self {
            balances,
            summary,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl LedgerGateway for StaticGateway {
    async fn fetch_balances(&self, address: &str) -> Result<BalanceSnapshot, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.balances)(address)
    }

    async fn fetch_transaction_summary(
        &self,
        address: &str,
    ) -> Result<TransactionSummary, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.summary)(address)
    }

    fn name(&self) -> &'static str {
        "StaticGateway"
    }
}

/// Forwards every tracker event to a channel.
pub struct RecordingHandler {
    events: mpsc::UnboundedSender<TrackerEvent>,
}

impl RecordingHandler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TrackerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (Self { events }, receiver)
    }
}

impl TrackerEventHandler for RecordingHandler {
    fn handle(&self, event: &TrackerEvent) {
        let _ = self.events.send(event.clone());
    }

    fn name(&self) -> &'static str {
        "RecordingHandler"
    }
}

/// Receive events until one matches `predicate`, failing after a generous timeout.
pub async fn expect_event<F>(
    events: &mut mpsc::UnboundedReceiver<TrackerEvent>,
    mut predicate: F,
) -> TrackerEvent
where
    F: FnMut(&TrackerEvent) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let event = events.recv().await.expect("event channel closed");
            if predicate(&event) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for tracker event")
}

/// Next balance request issued by the tracker.
pub async fn next_request(pending: &mut mpsc::UnboundedReceiver<PendingBalance>) -> PendingBalance {
    tokio::time::timeout(Duration::from_secs(5), pending.recv())
        .await
        .expect("timed out waiting for a balance request")
        .expect("gateway dropped")
}
