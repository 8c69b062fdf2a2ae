//! Pricing rule shared by every component that shows totals.
//!
//! Cart view, checkout summary, order confirmation and ledger rows must
//! all agree on the same numbers, so the subtotal/fee/total computation
//! lives here and nowhere else.

use crate::cart::Cart;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Delivery pricing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
	/// Subtotal at or above which delivery is free.
	pub free_delivery_threshold: Decimal,
	/// Flat delivery fee charged below the threshold.
	pub delivery_fee: Decimal,
}

impl Default for PricingRule {
	fn default() -> Self {
		PricingRule {
			free_delivery_threshold: Decimal::new(50, 0),
			delivery_fee: Decimal::new(5, 0),
		}
	}
}

/// The computed money breakdown for a cart or order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
	/// Sum of all line totals.
	pub subtotal: Decimal,
	/// Delivery fee applied to this subtotal (zero when free).
	pub delivery_fee: Decimal,
	/// Subtotal plus delivery fee.
	pub total: Decimal,
}

impl PricingRule {
	/// Computes the breakdown for a subtotal.
	///
	/// The fee is zero exactly when the subtotal reaches the free
	/// delivery threshold.
	pub fn quote_subtotal(&self, subtotal: Decimal) -> Totals {
		let delivery_fee = if subtotal >= self.free_delivery_threshold {
			Decimal::ZERO
		} else {
			self.delivery_fee
		};
		Totals {
			subtotal,
			delivery_fee,
			total: subtotal + delivery_fee,
		}
	}

	/// Computes the breakdown for a cart.
	pub fn quote(&self, cart: &Cart) -> Totals {
		self.quote_subtotal(cart.subtotal())
	}

	/// How much more a subtotal needs to qualify for free delivery.
	///
	/// Returns `None` when the subtotal already qualifies.
	pub fn remaining_for_free_delivery(&self, subtotal: Decimal) -> Option<Decimal> {
		if subtotal >= self.free_delivery_threshold {
			None
		} else {
			Some(self.free_delivery_threshold - subtotal)
		}
	}
}
