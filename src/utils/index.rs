/// Fraction digits shown for token amounts.
const MAX_FRACTION_DIGITS: usize = 6;

/// Render a raw integer token amount with `decimals` decimal places.
///
/// Works on the decimal string directly so balances beyond `u128` keep every digit.
/// Amounts below 0.001 render as `< 0.001`. Input that is not a plain digit string is
/// returned unchanged.
pub fn format_token_amount(raw: &str, decimals: u32) -> String {
	if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
		return raw.to_string();
	}

	let digits = raw.trim_start_matches('0');
	if digits.is_empty() {
		return "0".to_string();
	}

	let decimals = decimals as usize;
	let padded = format!("{:0>width$}", digits, width = decimals + 1);
	let (whole, fraction) = padded.split_at(padded.len() - decimals);

	if whole == "0" && fraction.bytes().take(3).all(|b| b == b'0') {
		return "< 0.001".to_string();
	}

	let fraction = fraction[..fraction.len().min(MAX_FRACTION_DIGITS)].trim_end_matches('0');
	if fraction.is_empty() {
		group_thousands(whole)
	} else {
		format!("{}.{}", group_thousands(whole), fraction)
	}
}

/// Render a USD amount with two decimals and thousands separators.
///
/// Non-zero amounts of either sign below one cent render as `< $0.01`.
pub fn format_usd(value: f64) -> String {
	if value == 0.0 {
		return "$0.00".to_string();
	}
	if value.abs() < 0.01 {
		return "< $0.01".to_string();
	}

	let fixed = format!("{:.2}", value.abs());
	let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
	let sign = if value < 0.0 { "-" } else { "" };
	format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}
	grouped
}
