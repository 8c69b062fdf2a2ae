//! Utility functions for formatting shared across components.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Formats a money amount with a dollar sign and two decimal places.
pub fn format_usd(amount: Decimal) -> String {
	format!("${:.2}", amount)
}

/// Formats a timestamp the way it appears in messages and ledger rows.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
	ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
