//! Indexer integration module for the tracked chain
//!
//! This module provides the clients and types for reading wallet balances and
//! transaction summaries from a GoldRush-style indexing service. Two transports are
//! available behind the same [`LedgerGateway`] trait: direct calls to the indexer, and
//! calls through this crate's own `/wallet/*` route layer.

/// REST client for the indexing service
mod client;
/// Client for the `/wallet/*` routes served by this crate
mod dashboard;
/// The gateway trait shared by both clients
mod gateway;
/// Type definitions for indexer data structures
mod types;

pub use client::GoldRushClient;
pub use dashboard::DashboardApiClient;
pub use gateway::LedgerGateway;
pub use types::*;
