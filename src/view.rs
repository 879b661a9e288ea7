//! Plain-text wallet cards for the `track` command.

use crate::utils::{format_token_amount, format_usd};
use crate::wallet::portfolio::{CARD_TOKEN_LIMIT, Portfolio, PriceChange};
use crate::wallet::{EntryState, WalletEntry, WalletSnapshot};

use std::fmt::Write;

/// Render one tracked wallet as a multi-line card.
pub fn render_wallet(entry: &WalletEntry, chain_label: &str) -> String {
	let mut card = String::new();
	let header = entry.address().short();

	match entry.state() {
		EntryState::Loading { previous: None } => {
			let _ = writeln!(card, "{}  {}", header, chain_label);
			let _ = writeln!(card, "  Loading...");
		}
		EntryState::Loading {
			previous: Some(snapshot),
		} => {
			let _ = writeln!(card, "{}  {}  (refreshing)", header, chain_label);
			render_snapshot(&mut card, snapshot);
		}
		EntryState::Failed(message) => {
			let _ = writeln!(card, "{}  {}", header, chain_label);
			let _ = writeln!(card, "  Failed to load wallet data");
			let _ = writeln!(card, "  {}", message);
		}
		EntryState::Ready(snapshot) => {
			let _ = writeln!(card, "{}  {}", header, chain_label);
			render_snapshot(&mut card, snapshot);
		}
	}

	card
}

fn render_snapshot(card: &mut String, snapshot: &WalletSnapshot) {
	let portfolio = Portfolio::new(&snapshot.balances);
	let _ = writeln!(
		card,
		"  Portfolio value: {}",
		format_usd(portfolio.total_value())
	);

	if portfolio.tokens().is_empty() {
		let _ = writeln!(card, "  No tokens found");
	}
	for token in portfolio.top(CARD_TOKEN_LIMIT) {
		let symbol = if token.contract_ticker_symbol.is_empty() {
			"??"
		} else {
			token.contract_ticker_symbol.as_str()
		};
		let _ = write!(
			card,
			"  {:<10} {:>24} {:>14}",
			symbol,
			format_token_amount(&token.balance, token.contract_decimals),
			format_usd(token.quote)
		);
		if matches!(token.quote_24h, Some(previous) if previous != 0.0) {
			let change = PriceChange::of(token);
			let _ = write!(
				card,
				"  {}{:.1}%",
				if change.is_positive { '+' } else { '-' },
				change.percentage
			);
		}
		card.push('\n');
	}
	let hidden = portfolio.overflow(CARD_TOKEN_LIMIT);
	if hidden > 0 {
		let _ = writeln!(card, "  +{} more tokens", hidden);
	}

	if let Some(summary) = &snapshot.transactions {
		let _ = write!(card, "  Transactions: {}", summary.total_count());
		if let Some(latest) = summary.latest_transaction() {
			let _ = write!(card, " (latest {})", latest.block_signed_at.format("%Y-%m-%d %H:%M UTC"));
		}
		card.push('\n');
	}
	let _ = writeln!(
		card,
		"  Last updated: {}",
		snapshot.balances.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::indexer::{BalanceSnapshot, TokenBalance};
	use crate::validation::WalletAddress;
	use crate::wallet::WalletTrackingStore;
	use chrono::{TimeZone, Utc};

	const ADDRESS: &str = "0xabcdef0123456789abcdef0123456789abcdef01";

	fn token(symbol: &str, quote: f64, quote_24h: Option<f64>) -> TokenBalance {
		TokenBalance {
			contract_decimals: 18,
			contract_name: symbol.to_string(),
			contract_ticker_symbol: symbol.to_string(),
			contract_address: String::new(),
			supports_erc: None,
			logo_url: String::new(),
			balance: "2500000000000000000".to_string(),
			balance_24h: None,
			quote,
			quote_24h,
			pretty_quote: None,
		}
	}

	fn snapshot(items: Vec<TokenBalance>) -> WalletSnapshot {
		WalletSnapshot {
			balances: BalanceSnapshot {
				address: ADDRESS.to_string(),
				updated_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
				next_update_at: None,
				quote_currency: "USD".to_string(),
				chain_id: 999,
				chain_name: "hyperevm-mainnet".to_string(),
				items,
			},
			transactions: None,
		}
	}

	fn render_after(result: Result<WalletSnapshot, &str>) -> String {
		let mut store = WalletTrackingStore::default();
		let ticket = store.insert(WalletAddress::parse(ADDRESS).unwrap()).unwrap();
		match result {
			Ok(snapshot) => store.on_fetch_succeeded(&ticket, snapshot),
			Err(message) => store.on_fetch_failed(&ticket, message),
		};
		render_wallet(&store.entries()[0], "HyperEVM")
	}

	#[test]
	fn loading_card() {
		let mut store = WalletTrackingStore::default();
		store.insert(WalletAddress::parse(ADDRESS).unwrap()).unwrap();

		let card = render_wallet(&store.entries()[0], "HyperEVM");
		assert!(card.starts_with("0xabcd...ef01  HyperEVM"));
		assert!(card.contains("Loading..."));
	}

	#[test]
	fn ready_card_lists_tokens_by_value() {
		let card = render_after(Ok(snapshot(vec![
			token("LOW", 50.0, None),
			token("HYPE", 100.0, Some(80.0)),
		])));

		assert!(card.contains("Portfolio value: $150.00"));
		let hype = card.find("HYPE").unwrap();
		let low = card.find("LOW").unwrap();
		assert!(hype < low);
		assert!(card.contains("2.5"));
		assert!(card.contains("+25.0%"));
		assert_eq!(card.matches('%').count(), 1);
		assert!(card.contains("Last updated: 2025-03-01 12:00:00 UTC"));
		assert!(!card.contains("more tokens"));
	}

	#[test]
	fn zero_previous_quote_hides_change() {
		let card = render_after(Ok(snapshot(vec![token("NEW", 10.0, Some(0.0))])));
		assert!(card.contains("NEW"));
		assert!(!card.contains('%'));
	}

	#[test]
	fn ready_card_caps_token_rows() {
		let items = (0..CARD_TOKEN_LIMIT + 2)
			.map(|i| token(&format!("T{}", i), i as f64, None))
			.collect();
		let card = render_after(Ok(snapshot(items)));

		assert!(card.contains("+2 more tokens"));
	}

	#[test]
	fn empty_wallet_card() {
		let card = render_after(Ok(snapshot(Vec::new())));
		assert!(card.contains("Portfolio value: $0.00"));
		assert!(card.contains("No tokens found"));
	}

	#[test]
	fn failed_card_shows_message() {
		let card = render_after(Err("Rate limit exceeded"));
		assert!(card.contains("Failed to load wallet data"));
		assert!(card.contains("Rate limit exceeded"));
	}
}
