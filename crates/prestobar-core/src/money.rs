//! Currency text parsing and formatting.
//!
//! Amounts arrive from the card service as display strings ("$1,234.56",
//! "-$3.00"). They are converted to [`Decimal`] before any arithmetic.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Everything that is not a digit, decimal point or minus sign
static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.\-]+").expect("Invalid NON_NUMERIC regex"));

/// Error raised when a currency string has no usable numeric content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid dollar amount: {input:?}")]
pub struct MoneyError {
    /// Input as received
    pub input: String,
}

/// Parse a dollar amount, tolerating currency symbols, commas and whitespace.
///
/// Accounting-style parentheses (`"($3.00)"`) are read as a negative value.
pub fn parse_dollar_amount(text: &str) -> Result<Decimal, MoneyError> {
    let trimmed = text.trim();
    let parenthesized = trimmed.starts_with('(') && trimmed.ends_with(')');

    let cleaned = NON_NUMERIC.replace_all(trimmed, "");
    let value = Decimal::from_str(&cleaned).map_err(|_| MoneyError {
        input: text.to_string(),
    })?;

    if parenthesized && value.is_sign_positive() {
        Ok(-value)
    } else {
        Ok(value)
    }
}

/// Format a value as dollars with two decimals: `$12.30`, `-$3.00`.
pub fn format_dollars(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}
