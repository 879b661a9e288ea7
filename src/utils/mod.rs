//!
//! Utility module for the wallet tracker.
//!
//! Re-exports formatting helpers used when rendering wallet cards.
/// Utility functions for formatting and display
pub mod index;

pub use index::{format_token_amount, format_usd};
