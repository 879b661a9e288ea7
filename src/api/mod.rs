//! HTTP route layer.
//!
//! Thin pass-through routes that validate an address, call the indexer gateway, and
//! serialise the response envelope. No caching, rate limiting or authentication.

pub mod handlers;
pub mod types;

use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::indexer::LedgerGateway;

/// Shared state for the route handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn LedgerGateway>,
    /// Chain label reported by `/health`.
    pub chain: String,
}

impl AppState {
    pub fn new(gateway: Arc<dyn LedgerGateway>, chain: impl Into<String>) -> Self {
        Self {
            gateway,
            chain: chain.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/wallet/balances", get(handlers::get_balances))
        .route("/wallet/transactions", get(handlers::get_transactions))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serve the routes on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    info!(
        "Serving wallet routes on {} for {}",
        listener.local_addr()?,
        state.chain
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
}
