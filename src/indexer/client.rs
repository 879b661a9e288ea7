//!
//! REST client for the GoldRush (Covalent) indexing service.
//!
//! This module provides an async client for the two wallet endpoints the tracker needs:
//! token balances and the transaction summary. Every response is unwrapped from the
//! service's `{ data, error, error_message }` envelope, and every failure shape is
//! folded into [`GatewayError`].

use super::gateway::LedgerGateway;
use super::types::*;
use crate::config::GatewayConfig;
use crate::validation::is_valid_address;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// GoldRush indexer client
#[derive(Clone)]
pub struct GoldRushClient {
	/// The underlying HTTP client.
	http_client: Client,
	/// Base URL of the REST API, without a trailing slash.
	base_url: String,
	api_key: String,
	/// Chain name used in request paths.
	chain: String,
	quote_currency: String,
}

impl GoldRushClient {
	/// Create a new indexer client.
	///
	/// # Arguments
	/// * `config` - Endpoint, credentials, chain and timeout settings.
	///
	/// # Returns
	/// A new `GoldRushClient`, or a `GatewayError` if the HTTP client cannot be built.
	pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
		let http_client = Client::builder()
			.timeout(config.request_timeout)
			.build()?;

		Ok(Self {
			http_client,
			base_url: config.base_url.trim_end_matches('/').to_string(),
			api_key: config.api_key.clone(),
			chain: config.chain.clone(),
			quote_currency: config.quote_currency.clone(),
		})
	}

	pub fn chain(&self) -> &str {
		&self.chain
	}

	/// Fetch one wallet endpoint and unwrap its envelope.
	///
	/// # Arguments
	/// * `address` - The wallet address; rejected locally if malformed.
	/// * `endpoint` - Path segment after the address, e.g. `balances_v2`.
	/// * `query` - Endpoint-specific query parameters.
	///
	/// # Returns
	/// The decoded `data` payload, or a `GatewayError`.
	async fn get_wallet_resource<T: DeserializeOwned>(
		&self,
		address: &str,
		endpoint: &str,
		query: &[(&str, &str)],
	) -> Result<T, GatewayError> {
		if !is_valid_address(address) {
			return Err(GatewayError::InvalidAddress(address.to_string()));
		}

		let url = format!(
			"{}/v1/{}/address/{}/{}/",
			self.base_url, self.chain, address, endpoint
		);
		debug!("GET {}", url);

		let response = self
			.http_client
			.get(&url)
			.bearer_auth(&self.api_key)
			.query(&[("quote-currency", self.quote_currency.as_str())])
			.query(query)
			.send()
			.await?;

		let status = response.status();
		let body = response.text().await?;

		let envelope: UpstreamEnvelope = match serde_json::from_str(&body) {
			Ok(envelope) => envelope,
			Err(e) if !status.is_success() => {
				warn!("Indexer returned {} with unreadable body: {}", status, e);
				return Err(GatewayError::upstream(
					Some(status.as_u16()),
					format!("HTTP error: {}", status),
				));
			}
			Err(e) => return Err(GatewayError::Payload(e)),
		};

		if envelope.error || !status.is_success() {
			let message = envelope
				.error_message
				.filter(|message| !message.trim().is_empty())
				.unwrap_or_else(|| format!("HTTP error: {}", status));
			warn!("Indexer reported an error for {}: {}", endpoint, message);
			return Err(GatewayError::upstream(Some(status.as_u16()), message));
		}

		let data = envelope.data.ok_or(GatewayError::NoData)?;
		if data.is_null() {
			return Err(GatewayError::NoData);
		}
		Ok(serde_json::from_value(data)?)
	}
}

#[async_trait::async_trait]
impl LedgerGateway for GoldRushClient {
	async fn fetch_balances(&self, address: &str) -> Result<BalanceSnapshot, GatewayError> {
		self.get_wallet_resource(
			address,
			"balances_v2",
			&[("nft", "false"), ("no-spam", "true")],
		)
		.await
	}

	async fn fetch_transaction_summary(
		&self,
		address: &str,
	) -> Result<TransactionSummary, GatewayError> {
		self.get_wallet_resource(address, "transactions_summary", &[("with-gas", "true")])
			.await
	}

	fn name(&self) -> &'static str {
		"GoldRushClient"
	}
}
