use crate::indexer::{BalanceSnapshot, TransactionSummary};
use crate::validation::{AddressError, WalletAddress};

use serde::Serialize;

/// Everything fetched for one wallet in a single fetch round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletSnapshot {
	pub balances: BalanceSnapshot,
	/// Absent when the summary was not requested or could not be fetched.
	pub transactions: Option<TransactionSummary>,
}

/// Fetch status of a tracked wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
	Loading,
	Ready,
	Failed,
}

/// Identifies one issued fetch round.
///
/// `incarnation` is unique per entry ever created in a store, so a wallet that is
/// removed and added again never accepts results addressed to its earlier life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
	pub address: WalletAddress,
	pub incarnation: u64,
	pub epoch: u64,
}

/// Why a completed fetch was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
	/// The entry has moved on to a newer epoch.
	Stale,
	/// The entry was removed while the fetch was in flight.
	Orphaned,
}

/// Result of handing a fetch completion to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
	Applied,
	Discarded(DiscardReason),
}

/// Errors raised synchronously by tracker commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
	#[error("{0}")]
	Validation(#[from] AddressError),

	#[error("Wallet already added: {0}")]
	DuplicateWallet(WalletAddress),

	#[error("Wallet is not tracked: {0}")]
	NotFound(WalletAddress),
}
