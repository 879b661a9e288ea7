//! Runtime configuration for the indexer gateway and the wallet tracker.
//!
//! Values normally come from the command line or the environment (see `main.rs`);
//! the defaults here target HyperEVM mainnet on the public GoldRush endpoint.

use std::time::Duration;

/// Public GoldRush (Covalent) REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.covalenthq.com";
/// The single chain this tracker reports on.
pub const DEFAULT_CHAIN: &str = "hyperevm-mainnet";
pub const DEFAULT_QUOTE_CURRENCY: &str = "USD";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("GoldRush API key is required (set GOLDRUSH_API_KEY or pass --api-key)")]
	MissingApiKey,

	#[error("Invalid URL {url}: {reason}")]
	InvalidUrl { url: String, reason: String },

	#[error("Request timeout must be greater than zero")]
	ZeroTimeout,
}

/// Connection settings for the indexing service.
#[derive(Clone)]
pub struct GatewayConfig {
	pub base_url: String,
	pub api_key: String,
	/// Chain name as used in indexer URL paths.
	pub chain: String,
	pub quote_currency: String,
	pub request_timeout: Duration,
}

impl GatewayConfig {
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			api_key: api_key.into(),
			chain: DEFAULT_CHAIN.to_string(),
			quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
		self.chain = chain.into();
		self
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.api_key.trim().is_empty() {
			return Err(ConfigError::MissingApiKey);
		}
		validate_url(&self.base_url)?;
		if self.request_timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}
		Ok(())
	}
}

// The API key never reaches log output.
impl std::fmt::Debug for GatewayConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GatewayConfig")
			.field("base_url", &self.base_url)
			.field("api_key", &"<redacted>")
			.field("chain", &self.chain)
			.field("quote_currency", &self.quote_currency)
			.field("request_timeout", &self.request_timeout)
			.finish()
	}
}

pub fn validate_url(url: &str) -> Result<(), ConfigError> {
	reqwest::Url::parse(url)
		.map(|_| ())
		.map_err(|e| ConfigError::InvalidUrl {
			url: url.to_string(),
			reason: e.to_string(),
		})
}

/// What happens to a ready snapshot when its wallet is refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
	/// Keep showing the previous snapshot until the new result lands.
	#[default]
	RetainSnapshot,
	/// Drop the previous snapshot as soon as the refresh starts.
	ClearSnapshot,
}

/// When the "add wallet" input should be disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputGatePolicy {
	/// Disabled while any tracked wallet is loading.
	#[default]
	WhileAnyLoading,
	/// Never disabled.
	AlwaysOpen,
}

/// Behaviour switches for the wallet tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
	/// Fetch the transaction summary alongside balances.
	pub include_transactions: bool,
	pub refresh_policy: RefreshPolicy,
	pub input_gate: InputGatePolicy,
}

impl Default for TrackerConfig {
	fn default() -> Self {
		Self {
			include_transactions: true,
			refresh_policy: RefreshPolicy::default(),
			input_gate: InputGatePolicy::default(),
		}
	}
}
