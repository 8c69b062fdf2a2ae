//! Order types and the order status lifecycle.
//!
//! An order is the immutable-once-created record of a completed checkout.
//! Its lines are a deep copy of the cart taken at creation time; later
//! cart activity never reaches a stored order.

use crate::cart::CartLine;
use crate::ids::ChatId;
use crate::pricing::Totals;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A completed checkout tracked through its fulfilment lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier for this order.
	pub id: String,
	/// Chat of the customer who placed the order.
	pub customer: ChatId,
	/// Customer name collected during checkout.
	pub customer_name: String,
	/// Phone number collected during checkout.
	pub phone: String,
	/// Delivery address collected during checkout.
	pub address: String,
	/// Snapshot of the cart lines at checkout time.
	pub lines: Vec<CartLine>,
	/// Money breakdown computed at checkout time.
	pub totals: Totals,
	/// Special delivery instructions, empty when none were given.
	pub instructions: String,
	/// Current fulfilment status.
	pub status: OrderStatus,
	/// Timestamp when this order was created.
	pub created_at: DateTime<Utc>,
	/// Timestamp when this order was last updated.
	pub updated_at: DateTime<Utc>,
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
	/// Order placed, awaiting a fulfilment decision.
	Pending,
	/// Order handed to the delivery driver.
	Shipped,
	/// Order delivered to the customer.
	Delivered,
	/// Order cancelled by the store.
	Cancelled,
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Pending => write!(f, "Pending"),
			OrderStatus::Shipped => write!(f, "Shipped"),
			OrderStatus::Delivered => write!(f, "Delivered"),
			OrderStatus::Cancelled => write!(f, "Cancelled"),
		}
	}
}
