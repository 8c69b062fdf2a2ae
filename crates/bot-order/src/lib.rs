//! Order tracking module for the ordering bot.
//!
//! The tracker owns the order lifecycle: it mints order ids, stores the
//! checkout snapshot, validates status transitions and propagates every
//! transition to the ledger sink and to the customer's chat. External
//! sinks are best-effort; the in-memory record is the source of truth
//! and is never left half-updated by a failed network call.

use bot_ledger::LedgerService;
use bot_notify::NotifierService;
use bot_storage::{StorageError, StorageKey, StorageService};
use bot_types::{Cart, ChatId, Order, OrderStatus, OutboundMessage, StoreProfile, Totals};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

pub mod templates;

/// Errors that can occur during order tracking operations.
#[derive(Debug, Error)]
pub enum OrderError {
	/// Error that occurs when the referenced order does not exist.
	#[error("Order not found: {0}")]
	NotFound(String),
	/// Error that occurs when a status transition is not allowed.
	#[error("Invalid status transition from {from} to {to}")]
	InvalidTransition {
		/// Status the order currently has.
		from: OrderStatus,
		/// Status the caller asked for.
		to: OrderStatus,
	},
	/// Error that occurs in the underlying state store.
	#[error("Storage error: {0}")]
	Storage(String),
}

/// Tracks orders through their fulfilment lifecycle.
///
/// The OrderTracker is the only component that mutates order records.
/// Status transitions update the ledger and notify the customer, both
/// best-effort: a sink failure is logged and the transition still
/// succeeds.
pub struct OrderTracker {
	storage: Arc<StorageService>,
	notifier: Arc<NotifierService>,
	ledger: Arc<LedgerService>,
	store: StoreProfile,
	/// Process-lifetime counter making ids unique within one second.
	sequence: AtomicU64,
}

impl OrderTracker {
	/// Creates a new OrderTracker over the given service seams.
	pub fn new(
		storage: Arc<StorageService>,
		notifier: Arc<NotifierService>,
		ledger: Arc<LedgerService>,
		store: StoreProfile,
	) -> Self {
		Self {
			storage,
			notifier,
			ledger,
			store,
			sequence: AtomicU64::new(1),
		}
	}

	/// Mints a fresh order id.
	///
	/// The wall-clock part keeps ids human-sortable; the monotonic
	/// counter keeps two checkouts in the same second distinct.
	fn next_order_id(&self) -> String {
		let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
		format!("ORD{}-{:03}", Utc::now().timestamp(), seq)
	}

	/// Creates a new Pending order from a checkout.
	///
	/// The cart lines are copied into the order, so later mutation of
	/// the caller's cart never reaches the stored record. Returns the
	/// stored order. Notifications are the checkout handler's job.
	pub async fn create_order(
		&self,
		customer: ChatId,
		customer_name: String,
		phone: String,
		address: String,
		cart: &Cart,
		instructions: String,
		totals: Totals,
	) -> Result<Order, OrderError> {
		let now = Utc::now();
		let order = Order {
			id: self.next_order_id(),
			customer,
			customer_name,
			phone,
			address,
			lines: cart.lines.clone(),
			totals,
			instructions,
			status: OrderStatus::Pending,
			created_at: now,
			updated_at: now,
		};

		self.storage
			.store(StorageKey::Orders.as_str(), &order.id, &order)
			.await
			.map_err(|e| OrderError::Storage(e.to_string()))?;

		// Append to the customer's creation-ordered id index.
		let customer_key = customer.to_string();
		let mut index: Vec<String> = self
			.storage
			.retrieve_or_default(StorageKey::CustomerOrders.as_str(), &customer_key)
			.await
			.map_err(|e| OrderError::Storage(e.to_string()))?;
		index.push(order.id.clone());
		self.storage
			.store(StorageKey::CustomerOrders.as_str(), &customer_key, &index)
			.await
			.map_err(|e| OrderError::Storage(e.to_string()))?;

		tracing::info!(
			order_id = %order.id,
			customer = %customer,
			total = %order.totals.total,
			"Order created"
		);

		Ok(order)
	}

	/// Transitions an order to a new status.
	///
	/// Fails when the order does not exist or the transition is not
	/// allowed. On success the record is persisted first, then the
	/// ledger row and the customer notification follow best-effort.
	/// Statuses without a message template update the record silently.
	pub async fn update_status(
		&self,
		order_id: &str,
		new_status: OrderStatus,
		note: Option<&str>,
	) -> Result<Order, OrderError> {
		let mut order: Order = self
			.storage
			.retrieve(StorageKey::Orders.as_str(), order_id)
			.await
			.map_err(|e| match e {
				StorageError::NotFound => OrderError::NotFound(order_id.to_string()),
				other => OrderError::Storage(other.to_string()),
			})?;

		if !is_valid_transition(order.status, new_status) {
			return Err(OrderError::InvalidTransition {
				from: order.status,
				to: new_status,
			});
		}

		let old_status = order.status;
		order.status = new_status;
		order.updated_at = Utc::now();

		self.storage
			.update(StorageKey::Orders.as_str(), order_id, &order)
			.await
			.map_err(|e| OrderError::Storage(e.to_string()))?;

		if let Err(e) = self
			.ledger
			.update_status(order_id, &new_status.to_string())
			.await
		{
			tracing::error!(order_id = %order_id, error = %e, "Failed to update ledger status");
		}

		if let Some(text) = templates::status_message(&order, &self.store, note) {
			self.notifier
				.send(order.customer, OutboundMessage::text(text))
				.await;
		}

		tracing::info!(
			order_id = %order_id,
			from = %old_status,
			to = %new_status,
			"Order status updated"
		);

		Ok(order)
	}

	/// Gets an order by id.
	pub async fn get_order(&self, order_id: &str) -> Result<Order, OrderError> {
		self.storage
			.retrieve(StorageKey::Orders.as_str(), order_id)
			.await
			.map_err(|e| match e {
				StorageError::NotFound => OrderError::NotFound(order_id.to_string()),
				other => OrderError::Storage(other.to_string()),
			})
	}

	/// Returns a customer's orders in creation order, most recent last.
	pub async fn orders_for_customer(&self, customer: ChatId) -> Result<Vec<Order>, OrderError> {
		let index: Vec<String> = self
			.storage
			.retrieve_or_default(StorageKey::CustomerOrders.as_str(), &customer.to_string())
			.await
			.map_err(|e| OrderError::Storage(e.to_string()))?;

		let mut orders = Vec::with_capacity(index.len());
		for id in index {
			orders.push(self.get_order(&id).await?);
		}
		Ok(orders)
	}
}

/// Checks whether a status transition is allowed.
///
/// Pending orders can move to any outcome; shipped orders can still be
/// delivered or cancelled; Delivered and Cancelled are terminal.
fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
	use OrderStatus::*;
	match (from, to) {
		(Pending, Shipped) | (Pending, Delivered) | (Pending, Cancelled) => true,
		(Shipped, Delivered) | (Shipped, Cancelled) => true,
		(Pending | Shipped | Delivered | Cancelled, _) => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use bot_ledger::implementations::disabled::DisabledLedger;
	use bot_notify::{NotifyError, NotifyInterface};
	use bot_storage::implementations::memory::MemoryStorage;
	use bot_types::Catalog;
	use bot_types::PricingRule;
	use rust_decimal::Decimal;
	use tokio::sync::Mutex;

	/// Notifier transport that records every delivered message.
	struct RecordingTransport {
		sent: Arc<Mutex<Vec<(ChatId, OutboundMessage)>>>,
	}

	#[async_trait]
	impl NotifyInterface for RecordingTransport {
		async fn deliver(
			&self,
			recipient: ChatId,
			message: &OutboundMessage,
		) -> Result<(), NotifyError> {
			self.sent.lock().await.push((recipient, message.clone()));
			Ok(())
		}
	}

	fn tracker() -> (OrderTracker, Arc<Mutex<Vec<(ChatId, OutboundMessage)>>>) {
		let sent = Arc::new(Mutex::new(Vec::new()));
		let tracker = OrderTracker::new(
			Arc::new(StorageService::new(Box::new(MemoryStorage::new()))),
			Arc::new(NotifierService::new(Box::new(RecordingTransport {
				sent: sent.clone(),
			}))),
			Arc::new(LedgerService::new(Box::new(DisabledLedger))),
			StoreProfile::default(),
		);
		(tracker, sent)
	}

	fn sample_cart() -> Cart {
		let catalog = Catalog::default();
		let mut cart = Cart::default();
		let apples = catalog.find_item("Apples").unwrap();
		cart.add(apples);
		cart.add(apples);
		cart.add(catalog.find_item("Milk").unwrap());
		cart
	}

	async fn place_order(tracker: &OrderTracker, customer: ChatId) -> Order {
		let cart = sample_cart();
		let totals = PricingRule::default().quote(&cart);
		tracker
			.create_order(
				customer,
				"Alice".to_string(),
				"555-0101".to_string(),
				"12 Elm Street".to_string(),
				&cart,
				String::new(),
				totals,
			)
			.await
			.unwrap()
	}

	#[tokio::test]
	async fn test_rapid_creation_yields_distinct_ids() {
		let (tracker, _) = tracker();

		let first = place_order(&tracker, ChatId(1)).await;
		let second = place_order(&tracker, ChatId(2)).await;

		assert_ne!(first.id, second.id);
	}

	#[tokio::test]
	async fn test_order_snapshot_isolated_from_cart() {
		let (tracker, _) = tracker();
		let catalog = Catalog::default();
		let mut cart = sample_cart();
		let totals = PricingRule::default().quote(&cart);

		let order = tracker
			.create_order(
				ChatId(1),
				"Alice".to_string(),
				"555-0101".to_string(),
				"12 Elm Street".to_string(),
				&cart,
				String::new(),
				totals,
			)
			.await
			.unwrap();

		// Mutating the cart afterwards must not reach the stored order.
		cart.add(catalog.find_item("Bacon").unwrap());
		cart.add(catalog.find_item("Apples").unwrap());

		let stored = tracker.get_order(&order.id).await.unwrap();
		assert_eq!(stored.lines.len(), 2);
		assert_eq!(quantity_of(&stored, "Apples"), 2);
	}

	fn quantity_of(order: &Order, item: &str) -> u32 {
		order
			.lines
			.iter()
			.find(|l| l.item == item)
			.map(|l| l.quantity)
			.unwrap_or(0)
	}

	#[tokio::test]
	async fn test_update_status_unknown_order() {
		let (tracker, sent) = tracker();

		let result = tracker
			.update_status("ORD0-000", OrderStatus::Shipped, None)
			.await;

		assert!(matches!(result, Err(OrderError::NotFound(_))));
		assert!(sent.lock().await.is_empty());
	}

	#[tokio::test]
	async fn test_shipped_sends_one_message_with_total() {
		let (tracker, sent) = tracker();
		let order = place_order(&tracker, ChatId(9)).await;

		tracker
			.update_status(&order.id, OrderStatus::Shipped, None)
			.await
			.unwrap();

		let sent = sent.lock().await;
		assert_eq!(sent.len(), 1);
		let (recipient, message) = &sent[0];
		assert_eq!(*recipient, ChatId(9));
		assert!(message.text.contains("$15.97"));
		assert!(message.text.contains(&order.id));
	}

	#[tokio::test]
	async fn test_cancelled_message_carries_reason() {
		let (tracker, sent) = tracker();
		let order = place_order(&tracker, ChatId(9)).await;

		tracker
			.update_status(&order.id, OrderStatus::Cancelled, Some("Out of stock"))
			.await
			.unwrap();

		let sent = sent.lock().await;
		assert_eq!(sent.len(), 1);
		assert!(sent[0].1.text.contains("Out of stock"));
	}

	#[tokio::test]
	async fn test_cancelled_without_reason_uses_default() {
		let (tracker, sent) = tracker();
		let order = place_order(&tracker, ChatId(9)).await;

		tracker
			.update_status(&order.id, OrderStatus::Cancelled, None)
			.await
			.unwrap();

		let sent = sent.lock().await;
		assert!(sent[0].1.text.contains("Unable to fulfill order"));
	}

	#[tokio::test]
	async fn test_terminal_states_reject_transitions() {
		let (tracker, sent) = tracker();
		let order = place_order(&tracker, ChatId(9)).await;

		tracker
			.update_status(&order.id, OrderStatus::Delivered, None)
			.await
			.unwrap();
		let result = tracker
			.update_status(&order.id, OrderStatus::Shipped, None)
			.await;

		assert!(matches!(
			result,
			Err(OrderError::InvalidTransition {
				from: OrderStatus::Delivered,
				to: OrderStatus::Shipped,
			})
		));
		// Only the Delivered notification went out.
		assert_eq!(sent.lock().await.len(), 1);

		let stored = tracker.get_order(&order.id).await.unwrap();
		assert_eq!(stored.status, OrderStatus::Delivered);
	}

	#[tokio::test]
	async fn test_orders_for_customer_in_creation_order() {
		let (tracker, _) = tracker();

		let first = place_order(&tracker, ChatId(5)).await;
		let second = place_order(&tracker, ChatId(5)).await;
		place_order(&tracker, ChatId(6)).await;

		let orders = tracker.orders_for_customer(ChatId(5)).await.unwrap();
		let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
		assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
	}

	#[tokio::test]
	async fn test_totals_survive_storage_round_trip() {
		let (tracker, _) = tracker();
		let order = place_order(&tracker, ChatId(1)).await;

		let stored = tracker.get_order(&order.id).await.unwrap();
		assert_eq!(stored.totals.subtotal, Decimal::new(1097, 2));
		assert_eq!(stored.totals.delivery_fee, Decimal::new(5, 0));
		assert_eq!(stored.totals.total, Decimal::new(1597, 2));
	}

	#[test]
	fn test_transition_table() {
		use OrderStatus::*;
		assert!(is_valid_transition(Pending, Shipped));
		assert!(is_valid_transition(Pending, Delivered));
		assert!(is_valid_transition(Pending, Cancelled));
		assert!(is_valid_transition(Shipped, Delivered));
		assert!(is_valid_transition(Shipped, Cancelled));
		assert!(!is_valid_transition(Shipped, Pending));
		assert!(!is_valid_transition(Delivered, Shipped));
		assert!(!is_valid_transition(Cancelled, Pending));
		assert!(!is_valid_transition(Pending, Pending));
	}
}
