//! Admin handlers: fulfilment decisions on tracked orders.
//!
//! All entry points here are reached only after the dispatcher has
//! verified the sender is the configured admin operator. Domain
//! failures (unknown order, illegal transition) come back to the admin
//! as text; storage failures propagate to the engine's recovery path.

use crate::{templates, DialogueError, DialogueService};
use bot_order::OrderError;
use bot_types::{ChatId, OrderStatus, OutboundMessage, SessionState};

/// Renders a domain failure as admin-visible text.
///
/// Returns `None` for failures that should propagate instead.
fn order_failure_reply(order_id: &str, err: &OrderError) -> Option<String> {
	match err {
		OrderError::NotFound(_) => Some(format!("Order #{} not found.", order_id)),
		OrderError::InvalidTransition { from, to } => Some(format!(
			"Order #{} cannot move from {} to {}.",
			order_id, from, to
		)),
		OrderError::Storage(_) => None,
	}
}

impl DialogueService {
	/// Marks an order as shipped and confirms to the admin.
	pub(crate) async fn admin_ship(
		&self,
		chat: ChatId,
		order_id: &str,
	) -> Result<(), DialogueError> {
		let result = self
			.orders
			.update_status(order_id, OrderStatus::Shipped, Some("Your order is on the way!"))
			.await;

		let reply = match result {
			Ok(order) => format!(
				"Order #{} marked as shipped! Customer notified.",
				order.id
			),
			Err(e) => match order_failure_reply(order_id, &e) {
				Some(reply) => reply,
				None => return Err(e.into()),
			},
		};

		self.notifier.send(chat, OutboundMessage::text(reply)).await;
		Ok(())
	}

	/// Asks the admin for a cancellation reason before cancelling.
	pub(crate) async fn admin_start_cancellation(
		&self,
		chat: ChatId,
		order_id: &str,
	) -> Result<(), DialogueError> {
		self.notifier
			.send(
				chat,
				OutboundMessage::text(format!(
					"Please provide reason for cancelling order #{}:",
					order_id
				)),
			)
			.await;
		self.state
			.set_session(
				chat,
				SessionState::AwaitingCancelReason {
					order_id: order_id.to_string(),
				},
			)
			.await
	}

	/// Cancels the order with the reason the admin just typed.
	pub(crate) async fn finish_cancellation(
		&self,
		chat: ChatId,
		order_id: &str,
		reason: &str,
	) -> Result<(), DialogueError> {
		let result = self
			.orders
			.update_status(order_id, OrderStatus::Cancelled, Some(reason))
			.await;

		let reply = match result {
			Ok(order) => format!(
				"Order #{} cancelled! Customer notified with your reason.",
				order.id
			),
			Err(e) => match order_failure_reply(order_id, &e) {
				Some(reply) => reply,
				None => return Err(e.into()),
			},
		};

		self.notifier.send(chat, OutboundMessage::text(reply)).await;
		self.state.set_session(chat, SessionState::MainMenu).await
	}

	/// Marks an order as delivered and confirms to the admin.
	pub(crate) async fn admin_deliver(
		&self,
		chat: ChatId,
		order_id: &str,
	) -> Result<(), DialogueError> {
		let result = self
			.orders
			.update_status(order_id, OrderStatus::Delivered, None)
			.await;

		let reply = match result {
			Ok(order) => format!(
				"Order #{} marked as delivered! Customer notified.",
				order.id
			),
			Err(e) => match order_failure_reply(order_id, &e) {
				Some(reply) => reply,
				None => return Err(e.into()),
			},
		};

		self.notifier.send(chat, OutboundMessage::text(reply)).await;
		Ok(())
	}

	/// Shows the full order record to the admin.
	pub(crate) async fn admin_details(
		&self,
		chat: ChatId,
		order_id: &str,
	) -> Result<(), DialogueError> {
		let reply = match self.orders.get_order(order_id).await {
			Ok(order) => templates::order_details_text(&order),
			Err(e) => match order_failure_reply(order_id, &e) {
				Some(reply) => reply,
				None => return Err(e.into()),
			},
		};

		self.notifier.send(chat, OutboundMessage::text(reply)).await;
		Ok(())
	}
}
