//! Handlers for the balance and transaction-summary routes.
//!
//! Both routes validate the `address` query parameter, forward one call to the
//! gateway, and wrap the result in the success or failure envelope.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::error;

use crate::api::types::{ApiFailure, ApiSuccess, HealthResponse};
use crate::api::AppState;
use crate::indexer::{BalanceSnapshot, GatewayError, TransactionSummary};
use crate::validation::is_valid_address;

/// Error half of every handler result
pub type ApiRejection = (StatusCode, Json<ApiFailure>);

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    pub address: Option<String>,
}

pub async fn get_balances(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<ApiSuccess<BalanceSnapshot>>, ApiRejection> {
    let address = require_address(query.address.as_deref())?;

    state
        .gateway
        .fetch_balances(address)
        .await
        .map(|data| Json(ApiSuccess::new(data)))
        .map_err(|e| gateway_rejection("Failed to fetch wallet balances", address, e))
}

pub async fn get_transactions(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<ApiSuccess<TransactionSummary>>, ApiRejection> {
    let address = require_address(query.address.as_deref())?;

    state
        .gateway
        .fetch_transaction_summary(address)
        .await
        .map(|data| Json(ApiSuccess::new(data)))
        .map_err(|e| gateway_rejection("Failed to fetch transaction summary", address, e))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        chain: state.chain.clone(),
        gateway: state.gateway.name().to_string(),
    })
}

fn require_address(address: Option<&str>) -> Result<&str, ApiRejection> {
    let address = match address {
        Some(address) if !address.is_empty() => address,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiFailure::new("Wallet address is required")),
            ));
        }
    };

    if !is_valid_address(address) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiFailure::new("Invalid wallet address format")),
        ));
    }

    Ok(address)
}

/// Map a gateway failure onto the route's error envelope.
///
/// Upstream-reported failures keep the service's message in `details`; anything else
/// is an internal error.
fn gateway_rejection(summary: &str, address: &str, e: GatewayError) -> ApiRejection {
    match e {
        GatewayError::InvalidAddress(_) => (
            StatusCode::BAD_REQUEST,
            Json(ApiFailure::new("Invalid wallet address format")),
        ),
        GatewayError::Upstream { status, message } => {
            error!(
                "Indexer error for {} (status {:?}): {}",
                address, status, message
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiFailure::new(summary).with_details(message)),
            )
        }
        other => {
            error!("Request for {} failed: {}", address, other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiFailure::new("Internal server error").with_details(other.to_string())),
            )
        }
    }
}
