//! The tracked-wallet collection and its per-entry fetch state machine.
//!
//! Every state change goes through one of the operations below; nothing else holds
//! a mutable reference to the entries. Each issued fetch is identified by a
//! [`FetchTicket`] and a completion is applied only if its ticket still matches the
//! entry, which is what keeps overlapping refreshes and remove/re-add sequences from
//! letting an old response overwrite a newer one.

use crate::config::RefreshPolicy;
use crate::validation::WalletAddress;
use crate::wallet::tracking::stats::FetchStats;
use crate::wallet::types::{
	DiscardReason, EntryStatus, FetchOutcome, FetchTicket, TrackerError, WalletSnapshot,
};

use std::sync::Arc;

/// Per-entry fetch state
#[derive(Debug, Clone)]
pub enum EntryState {
	/// A fetch is in flight. `previous` is the last good snapshot when the refresh
	/// policy retains it.
	Loading {
		previous: Option<Arc<WalletSnapshot>>,
	},
	Ready(Arc<WalletSnapshot>),
	Failed(String),
}

/// One tracked wallet
#[derive(Debug, Clone)]
pub struct WalletEntry {
	address: WalletAddress,
	incarnation: u64,
	epoch: u64,
	state: EntryState,
}

impl WalletEntry {
	pub fn address(&self) -> &WalletAddress {
		&self.address
	}

	/// Number of fetch rounds issued for this entry, starting at 1.
	pub fn epoch(&self) -> u64 {
		self.epoch
	}

	pub fn state(&self) -> &EntryState {
		&self.state
	}

	pub fn status(&self) -> EntryStatus {
		match self.state {
			EntryState::Loading { .. } => EntryStatus::Loading,
			EntryState::Ready(_) => EntryStatus::Ready,
			EntryState::Failed(_) => EntryStatus::Failed,
		}
	}

	pub fn is_loading(&self) -> bool {
		self.status() == EntryStatus::Loading
	}

	/// The snapshot to display: the ready one, or the one retained during a refresh.
	pub fn snapshot(&self) -> Option<&WalletSnapshot> {
		match &self.state {
			EntryState::Ready(snapshot) => Some(snapshot),
			EntryState::Loading { previous } => previous.as_deref(),
			EntryState::Failed(_) => None,
		}
	}

	pub fn error_message(&self) -> Option<&str> {
		match &self.state {
			EntryState::Failed(message) => Some(message),
			_ => None,
		}
	}

	fn ticket(&self) -> FetchTicket {
		FetchTicket {
			address: self.address.clone(),
			incarnation: self.incarnation,
			epoch: self.epoch,
		}
	}
}

/// Ordered collection of tracked wallets, unique by normalised address
#[derive(Debug)]
pub struct WalletTrackingStore {
	/// Insertion order is rendering order.
	entries: Vec<WalletEntry>,
	next_incarnation: u64,
	refresh_policy: RefreshPolicy,
	stats: FetchStats,
}

impl Default for WalletTrackingStore {
	fn default() -> Self {
		Self::new(RefreshPolicy::default())
	}
}

impl WalletTrackingStore {
	pub fn new(refresh_policy: RefreshPolicy) -> Self {
		Self {
			entries: Vec::new(),
			next_incarnation: 1,
			refresh_policy,
			stats: FetchStats::default(),
		}
	}

	/// Start tracking `address`.
	///
	/// Appends a `Loading` entry at epoch 1 and returns the ticket the caller must
	/// fetch for. An already tracked address is left untouched.
	pub fn insert(&mut self, address: WalletAddress) -> Result<FetchTicket, TrackerError> {
		if self.position(&address).is_some() {
			return Err(TrackerError::DuplicateWallet(address));
		}

		let entry = WalletEntry {
			address,
			incarnation: self.next_incarnation,
			epoch: 1,
			state: EntryState::Loading { previous: None },
		};
		self.next_incarnation += 1;

		let ticket = entry.ticket();
		self.entries.push(entry);
		self.stats.record_issued();
		Ok(ticket)
	}

	/// Stop tracking `address`. Returns false if it was not tracked.
	///
	/// Fetches still in flight for the entry are orphaned and will be discarded.
	pub fn remove(&mut self, address: &WalletAddress) -> bool {
		match self.position(address) {
			Some(index) => {
				self.entries.remove(index);
				true
			}
			None => false,
		}
	}

	/// Issue a new fetch round for a tracked wallet.
	pub fn begin_refresh(&mut self, address: &WalletAddress) -> Result<FetchTicket, TrackerError> {
		let policy = self.refresh_policy;
		let index = self
			.position(address)
			.ok_or_else(|| TrackerError::NotFound(address.clone()))?;
		let entry = &mut self.entries[index];

		let previous = match (&entry.state, policy) {
			(EntryState::Ready(snapshot), RefreshPolicy::RetainSnapshot) => Some(snapshot.clone()),
			(EntryState::Loading { previous }, RefreshPolicy::RetainSnapshot) => previous.clone(),
			_ => None,
		};
		entry.epoch += 1;
		entry.state = EntryState::Loading { previous };

		let ticket = entry.ticket();
		self.stats.record_issued();
		Ok(ticket)
	}

	/// Apply a successful fetch if its ticket is still current.
	pub fn on_fetch_succeeded(&mut self, ticket: &FetchTicket, snapshot: WalletSnapshot) -> FetchOutcome {
		match self.current_position(ticket) {
			Ok(index) => {
				self.entries[index].state = EntryState::Ready(Arc::new(snapshot));
				self.stats.record_applied();
				FetchOutcome::Applied
			}
			Err(reason) => {
				self.stats.record_discarded(reason);
				FetchOutcome::Discarded(reason)
			}
		}
	}

	/// Apply a failed fetch if its ticket is still current.
	pub fn on_fetch_failed(&mut self, ticket: &FetchTicket, reason: impl Into<String>) -> FetchOutcome {
		match self.current_position(ticket) {
			Ok(index) => {
				self.entries[index].state = EntryState::Failed(reason.into());
				self.stats.record_failed();
				FetchOutcome::Applied
			}
			Err(reason) => {
				self.stats.record_discarded(reason);
				FetchOutcome::Discarded(reason)
			}
		}
	}

	pub fn is_any_loading(&self) -> bool {
		self.entries.iter().any(WalletEntry::is_loading)
	}

	/// Entries in insertion order.
	pub fn entries(&self) -> &[WalletEntry] {
		&self.entries
	}

	pub fn get(&self, address: &WalletAddress) -> Option<&WalletEntry> {
		self.position(address).map(|index| &self.entries[index])
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn stats(&self) -> FetchStats {
		self.stats
	}

	fn position(&self, address: &WalletAddress) -> Option<usize> {
		self.entries.iter().position(|entry| &entry.address == address)
	}

	fn current_position(&self, ticket: &FetchTicket) -> Result<usize, DiscardReason> {
		let index = self
			.position(&ticket.address)
			.ok_or(DiscardReason::Orphaned)?;
		let entry = &self.entries[index];
		if entry.incarnation != ticket.incarnation {
			return Err(DiscardReason::Orphaned);
		}
		if entry.epoch != ticket.epoch {
			return Err(DiscardReason::Stale);
		}
		Ok(index)
	}
}
