//! Values derived from a balance snapshot for display: total value, tokens ordered by
//! value, and 24h price movement.

use crate::indexer::{BalanceSnapshot, TokenBalance};

use itertools::Itertools;

/// Tokens shown on a wallet card before the rest are summarised as a count.
pub const CARD_TOKEN_LIMIT: usize = 10;

/// Read-only portfolio view over one balance snapshot
#[derive(Debug, Clone)]
pub struct Portfolio<'a> {
	snapshot: &'a BalanceSnapshot,
	/// Tokens by descending quote; equal quotes keep indexer order.
	tokens: Vec<&'a TokenBalance>,
}

impl<'a> Portfolio<'a> {
	pub fn new(snapshot: &'a BalanceSnapshot) -> Self {
		let tokens = snapshot
			.items
			.iter()
			.sorted_by(|a, b| b.quote.total_cmp(&a.quote))
			.collect();
		Self { snapshot, tokens }
	}

	pub fn snapshot(&self) -> &BalanceSnapshot {
		self.snapshot
	}

	/// Sum of all token quotes.
	pub fn total_value(&self) -> f64 {
		self.snapshot.items.iter().map(|token| token.quote).sum()
	}

	pub fn tokens(&self) -> &[&'a TokenBalance] {
		&self.tokens
	}

	/// The `limit` most valuable tokens.
	pub fn top(&self, limit: usize) -> &[&'a TokenBalance] {
		&self.tokens[..self.tokens.len().min(limit)]
	}

	/// How many tokens fall outside [`Portfolio::top`] for the same limit.
	pub fn overflow(&self, limit: usize) -> usize {
		self.tokens.len().saturating_sub(limit)
	}
}

/// 24h quote movement of a single token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
	/// Absolute change in percent.
	pub percentage: f64,
	pub is_positive: bool,
}

impl PriceChange {
	/// Change from `quote_24h` to `quote`. Reported flat when there is no usable
	/// previous quote.
	pub fn of(token: &TokenBalance) -> Self {
		match token.quote_24h {
			Some(previous) if previous != 0.0 => {
				let change = (token.quote - previous) / previous * 100.0;
				Self {
					percentage: change.abs(),
					is_positive: change >= 0.0,
				}
			}
			_ => Self {
				percentage: 0.0,
				is_positive: true,
			},
		}
	}
}
