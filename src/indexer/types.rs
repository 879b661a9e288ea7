//! Types for the balance and transaction-summary endpoints of the indexing service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Point-in-time token balances for one wallet on the tracked chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// The wallet address as echoed by the indexer.
    pub address: String,
    pub updated_at: DateTime<Utc>,
    pub next_update_at: Option<DateTime<Utc>>,
    /// Currency of every `quote` field, normally `USD`.
    pub quote_currency: String,
    pub chain_id: u64,
    pub chain_name: String,
    #[serde(default)]
    pub items: Vec<TokenBalance>,
}

/// One fungible token held by a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_decimals: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_ticker_symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_erc: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logo_url: String,
    /// Raw on-chain integer balance, kept as a decimal string.
    #[serde(deserialize_with = "decimal_string")]
    pub balance: String,
    /// Raw balance 24 hours ago, when the indexer reports it.
    #[serde(
        default,
        deserialize_with = "optional_decimal_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub balance_24h: Option<String>,
    /// Value of the holding in the quote currency. Unpriced tokens report 0.
    #[serde(default, deserialize_with = "null_as_default")]
    pub quote: f64,
    #[serde(default)]
    pub quote_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_quote: Option<String>,
}

/// Transaction activity summary for one wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub address: String,
    pub updated_at: DateTime<Utc>,
    pub chain_id: u64,
    pub chain_name: String,
    #[serde(default)]
    pub items: Vec<TransactionSummaryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummaryItem {
    pub total_count: u64,
    #[serde(default)]
    pub latest_transaction: Option<TransactionRef>,
    #[serde(default)]
    pub earliest_transaction: Option<TransactionRef>,
    #[serde(default)]
    pub gas_summary: Option<GasSummary>,
}

/// Pointer to a single transaction on the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRef {
    pub block_signed_at: DateTime<Utc>,
    pub tx_hash: String,
    #[serde(default)]
    pub tx_detail_link: Option<String>,
}

/// Gas spent by a wallet across its sent transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasSummary {
    #[serde(default)]
    pub total_sent_count: u64,
    /// Total fees in the native token's smallest unit, as a decimal string.
    #[serde(default = "zero", deserialize_with = "decimal_string")]
    pub total_fees_paid: String,
    #[serde(default)]
    pub total_gas_quote: Option<f64>,
    #[serde(default)]
    pub pretty_total_gas_quote: Option<String>,
    #[serde(default)]
    pub average_gas_quote_per_tx: Option<f64>,
    #[serde(default)]
    pub pretty_average_gas_quote_per_tx: Option<String>,
}

impl TransactionSummary {
    /// Total transaction count across all summary items.
    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|item| item.total_count).sum()
    }

    /// The most recent transaction reported by any summary item.
    pub fn latest_transaction(&self) -> Option<&TransactionRef> {
        self.items
            .iter()
            .filter_map(|item| item.latest_transaction.as_ref())
            .max_by_key(|tx| tx.block_signed_at)
    }
}

/// Response envelope used by every indexer endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpstreamEnvelope {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub error_code: Option<i64>,
}

/// Error types for indexer requests.
///
/// Every upstream failure shape (HTTP status, in-body error flag, transport failure,
/// unreadable payload) lands in exactly one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    /// The service answered and reported a failure. `message` is passed through verbatim.
    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("No data returned")]
    NoData,
}

impl GatewayError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        GatewayError::Upstream {
            status,
            message: message.into(),
        }
    }

    /// True when the service itself reported the failure.
    pub fn is_upstream(&self) -> bool {
        matches!(self, GatewayError::Upstream { .. })
    }
}

fn zero() -> String {
    "0".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a raw integer as either a JSON string or a JSON number and keep it as text.
fn decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_decimal_string(deserializer).map(|value| value.unwrap_or_else(zero))
}

fn optional_decimal_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(text) => Ok(Some(text)),
        serde_json::Value::Number(number) => Ok(Some(number.to_string())),
        other => Err(D::Error::custom(format!(
            "expected an integer or decimal string, got {}",
            other
        ))),
    }
}
