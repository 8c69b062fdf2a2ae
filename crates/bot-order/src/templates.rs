//! Customer-facing message templates for order status transitions.
//!
//! Each status that warrants a customer notification has one fixed
//! template here. Statuses without a template (Pending) update the
//! record silently.

use bot_types::{format_usd, Order, OrderStatus, StoreProfile};

/// Renders the customer notification for a status transition.
///
/// Returns `None` when the status has no customer-facing message.
pub fn status_message(order: &Order, store: &StoreProfile, note: Option<&str>) -> Option<String> {
	match order.status {
		OrderStatus::Shipped => Some(shipped_message(order, store, note)),
		OrderStatus::Cancelled => Some(cancelled_message(order, store, note)),
		OrderStatus::Delivered => Some(delivered_message(order, store)),
		OrderStatus::Pending => None,
	}
}

fn shipped_message(order: &Order, store: &StoreProfile, note: Option<&str>) -> String {
	let note_line = match note {
		Some(note) if !note.is_empty() => format!("\nNote from store: {}\n", note),
		_ => String::new(),
	};

	format!(
		"Order Shipped\n\n\
		Hi {name},\n\n\
		Your order #{id} is on the way!\n\n\
		Delivery details:\n\
		- Your order will arrive within 2 hours\n\
		- Please have {total} ready for cash payment\n\
		- Contact {phone} if any issues\n\
		{note_line}\n\
		Thank you for choosing {store}!",
		name = order.customer_name,
		id = order.id,
		total = format_usd(order.totals.total),
		phone = store.contact_phone,
		note_line = note_line,
		store = store.name,
	)
}

fn cancelled_message(order: &Order, store: &StoreProfile, note: Option<&str>) -> String {
	let reason = match note {
		Some(note) if !note.is_empty() => note,
		_ => "Unable to fulfill order at this time",
	};

	format!(
		"Order Cancelled\n\n\
		Hi {name},\n\n\
		We're sorry to inform you that your order #{id} has been cancelled.\n\n\
		Reason: {reason}\n\n\
		We apologize for the inconvenience.\n\n\
		The {store} team",
		name = order.customer_name,
		id = order.id,
		reason = reason,
		store = store.name,
	)
}

fn delivered_message(order: &Order, store: &StoreProfile) -> String {
	format!(
		"Order Delivered\n\n\
		Hi {name},\n\n\
		Your order #{id} has been successfully delivered!\n\n\
		Thank you for shopping with {store}! We hope to serve you again soon.",
		name = order.customer_name,
		id = order.id,
		store = store.name,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use bot_types::{CartLine, ChatId, Totals};
	use chrono::Utc;
	use rust_decimal::Decimal;

	fn order_with_status(status: OrderStatus) -> Order {
		Order {
			id: "ORD1700000000-001".to_string(),
			customer: ChatId(42),
			customer_name: "Alice".to_string(),
			phone: "555-0101".to_string(),
			address: "12 Elm Street".to_string(),
			lines: vec![CartLine {
				item: "Apples".to_string(),
				unit_price: Decimal::new(399, 2),
				unit: "kg".to_string(),
				quantity: 2,
			}],
			totals: Totals {
				subtotal: Decimal::new(798, 2),
				delivery_fee: Decimal::new(5, 0),
				total: Decimal::new(1298, 2),
			},
			instructions: String::new(),
			status,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		}
	}

	#[test]
	fn test_pending_has_no_message() {
		let order = order_with_status(OrderStatus::Pending);
		assert!(status_message(&order, &StoreProfile::default(), None).is_none());
	}

	#[test]
	fn test_shipped_message_contents() {
		let order = order_with_status(OrderStatus::Shipped);
		let text = status_message(&order, &StoreProfile::default(), None).unwrap();

		assert!(text.contains("Hi Alice"));
		assert!(text.contains("#ORD1700000000-001"));
		assert!(text.contains("$12.98"));
		assert!(text.contains("555-1234"));
		assert!(!text.contains("Note from store"));
	}

	#[test]
	fn test_shipped_message_with_note() {
		let order = order_with_status(OrderStatus::Shipped);
		let text =
			status_message(&order, &StoreProfile::default(), Some("Ring twice")).unwrap();
		assert!(text.contains("Note from store: Ring twice"));
	}

	#[test]
	fn test_cancelled_default_reason() {
		let order = order_with_status(OrderStatus::Cancelled);
		let text = status_message(&order, &StoreProfile::default(), None).unwrap();
		assert!(text.contains("Reason: Unable to fulfill order at this time"));
	}

	#[test]
	fn test_delivered_thanks_the_customer() {
		let order = order_with_status(OrderStatus::Delivered);
		let text = status_message(&order, &StoreProfile::default(), None).unwrap();
		assert!(text.contains("successfully delivered"));
		assert!(text.contains("FreshMart"));
	}
}
