//! Ledger sink module for the ordering bot.
//!
//! Orders are appended to an external tabular record store so they
//! survive process restarts. Every operation here is best-effort with a
//! single attempt: the store being down must never block or corrupt an
//! order, so call sites log failures and continue.

use async_trait::async_trait;
use bot_types::{format_timestamp, format_usd, Order};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod disabled;
	pub mod http;
}

/// Column headers of the ledger table, in column order.
pub const LEDGER_HEADERS: [&str; 15] = [
	"Order Date",
	"Chat ID",
	"Customer Name",
	"Phone",
	"Address",
	"Items",
	"Quantities",
	"Subtotal",
	"Delivery Fee",
	"Total",
	"Status",
	"Special Instructions",
	"Payment Method",
	"Source",
	"Order ID",
];

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error returned by the record store.
	#[error("Record store error ({status}): {body}")]
	Store {
		/// HTTP status code returned by the store.
		status: u16,
		/// Response body for diagnostics.
		body: String,
	},
}

/// One fixed-column ledger row, derived from an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
	/// Order creation time, formatted for the ledger.
	pub date: String,
	/// Customer chat id as a string cell.
	pub customer_id: String,
	/// Customer name.
	pub customer_name: String,
	/// Customer phone number.
	pub phone: String,
	/// Delivery address.
	pub address: String,
	/// Comma-joined item names.
	pub items: String,
	/// Comma-joined quantities with units, aligned with `items`.
	pub quantities: String,
	/// Subtotal formatted as money.
	pub subtotal: String,
	/// Delivery fee formatted as money.
	pub delivery_fee: String,
	/// Total formatted as money.
	pub total: String,
	/// Order status at the time the row was written.
	pub status: String,
	/// Special delivery instructions.
	pub instructions: String,
	/// Payment method; always cash on delivery.
	pub payment_method: String,
	/// Channel the order arrived through.
	pub source: String,
	/// Order identifier, used to find the row for status updates.
	pub order_id: String,
}

impl LedgerRow {
	/// Builds the ledger row for an order.
	pub fn from_order(order: &Order) -> Self {
		let items: Vec<&str> = order.lines.iter().map(|l| l.item.as_str()).collect();
		let quantities: Vec<String> = order
			.lines
			.iter()
			.map(|l| format!("{} {}", l.quantity, l.unit))
			.collect();

		LedgerRow {
			date: format_timestamp(order.created_at),
			customer_id: order.customer.to_string(),
			customer_name: order.customer_name.clone(),
			phone: order.phone.clone(),
			address: order.address.clone(),
			items: items.join(", "),
			quantities: quantities.join(", "),
			subtotal: format_usd(order.totals.subtotal),
			delivery_fee: format_usd(order.totals.delivery_fee),
			total: format_usd(order.totals.total),
			status: order.status.to_string(),
			instructions: order.instructions.clone(),
			payment_method: "Cash on Delivery".to_string(),
			source: "Telegram Bot".to_string(),
			order_id: order.id.clone(),
		}
	}
}

/// Trait defining the interface for ledger record stores.
///
/// Implementations append rows and update the status cell of existing
/// rows in an external tabular store. Exactly one attempt per call; the
/// caller decides what a failure means.
#[async_trait]
pub trait LedgerInterface: Send + Sync {
	/// Makes sure the header row exists. Called once at startup.
	async fn ensure_headers(&self) -> Result<(), LedgerError>;

	/// Appends one order row to the store.
	async fn append_order(&self, row: &LedgerRow) -> Result<(), LedgerError>;

	/// Updates the status column of the row matching the order id.
	async fn update_status(&self, order_id: &str, status: &str) -> Result<(), LedgerError>;
}

/// Service wrapping the configured ledger store.
///
/// Exists so the dialogue engine and order tracker share one seam; the
/// best-effort policy lives at the call sites, which log failures and
/// carry on.
pub struct LedgerService {
	/// The underlying record store implementation.
	store: Box<dyn LedgerInterface>,
}

impl LedgerService {
	/// Creates a new LedgerService with the specified store.
	pub fn new(store: Box<dyn LedgerInterface>) -> Self {
		Self { store }
	}

	/// Makes sure the header row exists. Best-effort, logs on failure.
	pub async fn ensure_headers(&self) {
		if let Err(e) = self.store.ensure_headers().await {
			tracing::warn!(error = %e, "Failed to initialize ledger headers");
		}
	}

	/// Appends one order row.
	pub async fn append_order(&self, row: &LedgerRow) -> Result<(), LedgerError> {
		self.store.append_order(row).await
	}

	/// Updates the status cell of the row matching the order id.
	pub async fn update_status(&self, order_id: &str, status: &str) -> Result<(), LedgerError> {
		self.store.update_status(order_id, status).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bot_types::{CartLine, ChatId, OrderStatus, Totals};
	use chrono::{TimeZone, Utc};
	use rust_decimal::Decimal;

	fn sample_order() -> Order {
		Order {
			id: "ORD1700000000-001".to_string(),
			customer: ChatId(42),
			customer_name: "Alice".to_string(),
			phone: "555-0101".to_string(),
			address: "12 Elm Street".to_string(),
			lines: vec![
				CartLine {
					item: "Apples".to_string(),
					unit_price: Decimal::new(399, 2),
					unit: "kg".to_string(),
					quantity: 2,
				},
				CartLine {
					item: "Milk".to_string(),
					unit_price: Decimal::new(299, 2),
					unit: "liter".to_string(),
					quantity: 1,
				},
			],
			totals: Totals {
				subtotal: Decimal::new(1097, 2),
				delivery_fee: Decimal::new(5, 0),
				total: Decimal::new(1597, 2),
			},
			instructions: "Leave at door".to_string(),
			status: OrderStatus::Pending,
			created_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap(),
			updated_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap(),
		}
	}

	#[test]
	fn test_row_from_order() {
		let row = LedgerRow::from_order(&sample_order());

		assert_eq!(row.date, "2024-03-05 14:30:09");
		assert_eq!(row.customer_id, "42");
		assert_eq!(row.items, "Apples, Milk");
		assert_eq!(row.quantities, "2 kg, 1 liter");
		assert_eq!(row.subtotal, "$10.97");
		assert_eq!(row.delivery_fee, "$5.00");
		assert_eq!(row.total, "$15.97");
		assert_eq!(row.status, "Pending");
		assert_eq!(row.payment_method, "Cash on Delivery");
		assert_eq!(row.source, "Telegram Bot");
		assert_eq!(row.order_id, "ORD1700000000-001");
	}

	#[test]
	fn test_headers_match_row_width() {
		let row = LedgerRow::from_order(&sample_order());
		let as_json = serde_json::to_value(&row).unwrap();
		assert_eq!(as_json.as_object().unwrap().len(), LEDGER_HEADERS.len());
	}
}
