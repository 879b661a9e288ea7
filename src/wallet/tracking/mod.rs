//! Wallet Tracking Module
//!
//! This module holds the multi-wallet data-orchestration layer: the list of tracked
//! wallets, the per-wallet fetch state, and the glue that keeps it loaded.
//!
//! - `store`: The ordered wallet collection and its epoch-guarded state machine. Synchronous and free of I/O.
//! - `orchestrator`: `WalletTracker`, which turns commands into store mutations and spawned gateway fetches.
//! - `events`: Event types and handler traits used to observe the tracker without coupling to it.
//! - `stats`: Counters for issued, applied and discarded fetch rounds.

/// Event system for observing tracker activity
pub mod events;
/// Connects the store to an indexer gateway
pub mod orchestrator;
/// Fetch round accounting
pub mod stats;
/// Tracked wallet collection and per-entry state
pub mod store;

pub use events::{EventDispatcher, TracingEventHandler, TrackerEvent, TrackerEventHandler};
pub use orchestrator::WalletTracker;
pub use stats::FetchStats;
pub use store::{EntryState, WalletEntry, WalletTrackingStore};
