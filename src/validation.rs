//! Wallet address validation.
//!
//! EVM addresses are accepted in their usual textual shape: `0x` followed by exactly
//! 40 hexadecimal characters, in any case. Addresses that pass are kept in lowercase
//! so that two spellings of the same account compare equal.

use std::fmt;
use std::str::FromStr;

/// Length of `0x` plus 20 hex-encoded bytes.
const ADDRESS_LEN: usize = 42;

/// Returns true iff `candidate` is `0x` followed by 40 hex characters.
///
/// Total and side-effect free. No trimming is performed.
pub fn is_valid_address(candidate: &str) -> bool {
	candidate.len() == ADDRESS_LEN
		&& candidate.starts_with("0x")
		&& hex::decode(&candidate[2..]).is_ok()
}

/// Reasons raw user input is not accepted as an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
	#[error("Please enter a wallet address")]
	Empty,

	#[error("Please enter a valid Ethereum address (0x...)")]
	Malformed(String),
}

/// A validated, lowercase wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WalletAddress(String);

impl WalletAddress {
	/// Parse raw input. Surrounding whitespace is ignored.
	pub fn parse(raw: &str) -> Result<Self, AddressError> {
		let trimmed = raw.trim();
		if trimmed.is_empty() {
			return Err(AddressError::Empty);
		}
		if !is_valid_address(trimmed) {
			return Err(AddressError::Malformed(trimmed.to_string()));
		}
		Ok(Self(trimmed.to_ascii_lowercase()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Abbreviated form used in card headers, e.g. `0xabcd...ef01`.
	pub fn short(&self) -> String {
		format!("{}...{}", &self.0[..6], &self.0[ADDRESS_LEN - 4..])
	}
}

impl FromStr for WalletAddress {
	type Err = AddressError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl AsRef<str> for WalletAddress {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for WalletAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
