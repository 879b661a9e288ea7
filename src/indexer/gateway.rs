//! The read-only interface the tracker and the route layer use to reach the indexer.

use super::types::{BalanceSnapshot, GatewayError, TransactionSummary};

/// Two idempotent reads against the indexing service, scoped to one chain.
///
/// Implementations validate the address shape themselves and return
/// [`GatewayError::InvalidAddress`] without touching the network when it is malformed.
#[async_trait::async_trait]
pub trait LedgerGateway: Send + Sync {
	/// Token balances held by `address`.
	async fn fetch_balances(&self, address: &str) -> Result<BalanceSnapshot, GatewayError>;

	/// Transaction counts and gas usage for `address`.
	async fn fetch_transaction_summary(
		&self,
		address: &str,
	) -> Result<TransactionSummary, GatewayError>;

	/// Get the name of this gateway for logging and diagnostics.
	fn name(&self) -> &'static str;
}
