//! Client for the `/wallet/balances` and `/wallet/transactions` routes.
//!
//! Lets a tracker run against a deployed route layer instead of holding an
//! indexer API key itself.

use super::gateway::LedgerGateway;
use super::types::{BalanceSnapshot, GatewayError, TransactionSummary};
use crate::validation::is_valid_address;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Fallback when a failure envelope carries neither `details` nor `error`.
const GENERIC_FAILURE: &str = "Failed to fetch wallet data";

/// Either side of the route layer's `{ success, data } | { error, details }` envelope.
#[derive(Debug, Deserialize)]
struct RouteEnvelope {
	#[serde(default)]
	success: bool,
	#[serde(default)]
	data: Option<serde_json::Value>,
	#[serde(default)]
	error: Option<String>,
	#[serde(default)]
	details: Option<String>,
}

#[derive(Clone)]
pub struct DashboardApiClient {
	http_client: Client,
	base_url: String,
}

impl DashboardApiClient {
	pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, GatewayError> {
		let http_client = Client::builder().timeout(request_timeout).build()?;
		Ok(Self {
			http_client,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	async fn get_route<T: DeserializeOwned>(
		&self,
		route: &str,
		address: &str,
	) -> Result<T, GatewayError> {
		if !is_valid_address(address) {
			return Err(GatewayError::InvalidAddress(address.to_string()));
		}

		let url = format!("{}/wallet/{}", self.base_url, route);
		debug!("GET {}?address={}", url, address);

		let response = self
			.http_client
			.get(&url)
			.query(&[("address", address)])
			.send()
			.await?;
		let status = response.status();
		let body = response.text().await?;

		let envelope: RouteEnvelope = match serde_json::from_str(&body) {
			Ok(envelope) => envelope,
			Err(e) if !status.is_success() => {
				warn!("Route layer returned {} with unreadable body: {}", status, e);
				return Err(GatewayError::upstream(
					Some(status.as_u16()),
					format!("HTTP error: {}", status),
				));
			}
			Err(e) => return Err(GatewayError::Payload(e)),
		};
		if envelope.success {
			let data = envelope.data.ok_or(GatewayError::NoData)?;
			return Ok(serde_json::from_value(data)?);
		}

		// `details` carries the indexer's own message; `error` is the route's summary.
		let message = envelope
			.details
			.or(envelope.error)
			.unwrap_or_else(|| GENERIC_FAILURE.to_string());
		Err(GatewayError::upstream(Some(status.as_u16()), message))
	}
}

#[async_trait::async_trait]
impl LedgerGateway for DashboardApiClient {
	async fn fetch_balances(&self, address: &str) -> Result<BalanceSnapshot, GatewayError> {
		self.get_route("balances", address).await
	}

	async fn fetch_transaction_summary(
		&self,
		address: &str,
	) -> Result<TransactionSummary, GatewayError> {
		self.get_route("transactions", address).await
	}

	fn name(&self) -> &'static str {
		"DashboardApiClient"
	}
}
