//! Multi-wallet balance tracker for a single EVM chain.
//!
//! Wallet data comes from a GoldRush-style indexing service through the
//! [`indexer::LedgerGateway`] trait. [`wallet::WalletTracker`] keeps a list of wallets
//! loaded with per-wallet loading, ready and failed states, and [`api`] exposes the
//! two pass-through routes the dashboard front-end calls.

pub mod api;
pub mod config;
pub mod indexer;
pub mod utils;
pub mod validation;
pub mod view;
pub mod wallet;
