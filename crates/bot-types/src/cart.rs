//! Cart types for the ordering bot.
//!
//! A cart is the per-customer mutable collection of selected items prior
//! to checkout. Each line carries a snapshot of the catalog price and
//! unit taken when the item was first added, so catalog changes never
//! retroactively alter a cart or an order created from it.

use crate::catalog::CatalogItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One selected item with its frozen price snapshot and quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
	/// Name of the catalog item.
	pub item: String,
	/// Price per unit, snapshotted at the time the item was added.
	pub unit_price: Decimal,
	/// Unit the price applies to, snapshotted alongside the price.
	pub unit: String,
	/// Number of units. Always at least 1; removal deletes the line.
	pub quantity: u32,
}

impl CartLine {
	/// Total for this line: unit price times quantity.
	pub fn line_total(&self) -> Decimal {
		self.unit_price * Decimal::from(self.quantity)
	}
}

/// A customer's shopping cart.
///
/// Lines are kept in insertion order; order matters only for display,
/// never for totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
	/// Cart lines in the order items were first added.
	pub lines: Vec<CartLine>,
}

impl Cart {
	/// Adds one unit of a catalog item to the cart.
	///
	/// If a line for the item already exists its quantity is incremented;
	/// otherwise a new line is created with a snapshot of the item's
	/// current price and unit.
	pub fn add(&mut self, item: &CatalogItem) {
		if let Some(line) = self.lines.iter_mut().find(|l| l.item == item.name) {
			line.quantity += 1;
		} else {
			self.lines.push(CartLine {
				item: item.name.clone(),
				unit_price: item.price,
				unit: item.unit.clone(),
				quantity: 1,
			});
		}
	}

	/// Returns the line for an item, if present.
	pub fn line(&self, item: &str) -> Option<&CartLine> {
		self.lines.iter().find(|l| l.item == item)
	}

	/// Removes every line from the cart. Idempotent.
	pub fn clear(&mut self) {
		self.lines.clear();
	}

	/// True when the cart holds no lines.
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Sum of all line totals, before any delivery fee.
	pub fn subtotal(&self) -> Decimal {
		self.lines.iter().map(|l| l.line_total()).sum()
	}
}
