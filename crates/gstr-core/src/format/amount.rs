//! Rupee amount parsing and formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::InputError;

/// Parse a user-entered amount such as `"₹1,23,456.50"` or `"Rs. 99"`.
///
/// Non-numeric text is rejected instead of silently turning into zero.
pub fn parse_amount(s: &str) -> Result<Decimal, InputError> {
    let trimmed = s.trim();
    let without_symbol = trimmed
        .strip_prefix('₹')
        .or_else(|| trimmed.strip_prefix("Rs."))
        .or_else(|| trimmed.strip_prefix("Rs"))
        .unwrap_or(trimmed);

    let cleaned: String = without_symbol
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(InputError::NotANumber(s.to_string()));
    }

    Decimal::from_str(&cleaned).map_err(|_| InputError::NotANumber(s.to_string()))
}

/// Round to paise, half away from zero.
pub fn round_paise(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with Indian digit grouping, without the currency sign
/// (e.g. `12,34,567.89`).
pub fn format_indian(amount: Decimal) -> String {
    let rounded = round_paise(amount);
    let s = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    // Last three digits, then groups of two
    let digits: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    let head_len = digits.len().saturating_sub(3);

    for (i, c) in digits.iter().enumerate() {
        if i > 0 && i <= head_len && (head_len - i) % 2 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}{}.{}", sign, formatted, decimal_part)
}

/// Format an amount in rupees (e.g. `₹12,34,567.89`).
pub fn format_inr(amount: Decimal) -> String {
    let formatted = format_indian(amount);
    match formatted.strip_prefix('-') {
        Some(positive) => format!("-₹{}", positive),
        None => format!("₹{}", formatted),
    }
}
