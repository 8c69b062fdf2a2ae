//! Checkout wizard handlers.
//!
//! The wizard collects name, phone, address and special instructions one
//! free-text message at a time, threading the fields through the session
//! state. The final step creates the order, writes the ledger row and
//! sends both confirmations; the cart and session are reset even when
//! the external sinks fail.

use crate::{templates, DialogueError, DialogueService};
use bot_ledger::LedgerRow;
use bot_types::{ChatId, OutboundMessage, SessionState};

impl DialogueService {
	/// Opens the checkout wizard for a non-empty cart.
	pub(crate) async fn start_checkout(&self, chat: ChatId) -> Result<(), DialogueError> {
		let cart = self.state.cart(chat).await?;
		if cart.is_empty() {
			self.notifier
				.send(
					chat,
					OutboundMessage::text(templates::checkout_empty_cart_text()),
				)
				.await;
			return self.show_categories(chat).await;
		}

		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::checkout_name_prompt()),
			)
			.await;
		self.state
			.set_session(chat, SessionState::AwaitingName)
			.await
	}

	/// Stores the customer name and asks for the phone number.
	pub(crate) async fn collect_name(&self, chat: ChatId, text: &str) -> Result<(), DialogueError> {
		if text.is_empty() {
			self.notifier
				.send(
					chat,
					OutboundMessage::text(templates::checkout_name_prompt()),
				)
				.await;
			return Ok(());
		}

		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::checkout_phone_prompt(text)),
			)
			.await;
		self.state
			.set_session(
				chat,
				SessionState::AwaitingPhone {
					name: text.to_string(),
				},
			)
			.await
	}

	/// Stores the phone number and asks for the delivery address.
	pub(crate) async fn collect_phone(
		&self,
		chat: ChatId,
		name: String,
		text: &str,
	) -> Result<(), DialogueError> {
		if text.is_empty() {
			self.notifier
				.send(
					chat,
					OutboundMessage::text(templates::checkout_phone_prompt(&name)),
				)
				.await;
			return Ok(());
		}

		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::checkout_address_prompt()),
			)
			.await;
		self.state
			.set_session(
				chat,
				SessionState::AwaitingAddress {
					name,
					phone: text.to_string(),
				},
			)
			.await
	}

	/// Stores the address and asks for special instructions.
	pub(crate) async fn collect_address(
		&self,
		chat: ChatId,
		name: String,
		phone: String,
		text: &str,
	) -> Result<(), DialogueError> {
		if text.is_empty() {
			self.notifier
				.send(
					chat,
					OutboundMessage::text(templates::checkout_address_prompt()),
				)
				.await;
			return Ok(());
		}

		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::checkout_instructions_prompt()),
			)
			.await;
		self.state
			.set_session(
				chat,
				SessionState::AwaitingInstructions {
					name,
					phone,
					address: text.to_string(),
				},
			)
			.await
	}

	/// Final wizard step: creates the order and fans out notifications.
	///
	/// Side-effect order matters: the order record exists before any
	/// external call, ledger failure downgrades to an admin warning, and
	/// cart/session reset happens regardless of sink outcomes.
	pub(crate) async fn finalize_checkout(
		&self,
		chat: ChatId,
		name: String,
		phone: String,
		address: String,
		text: &str,
	) -> Result<(), DialogueError> {
		let instructions = if text.eq_ignore_ascii_case("none") {
			String::new()
		} else {
			text.to_string()
		};

		let cart = self.state.cart(chat).await?;
		if cart.is_empty() {
			// Cart vanished mid-wizard; nothing to order.
			self.notifier
				.send(
					chat,
					OutboundMessage::text(templates::checkout_empty_cart_text()),
				)
				.await;
			self.state.set_session(chat, SessionState::MainMenu).await?;
			return self.show_categories(chat).await;
		}

		let totals = self.pricing.quote(&cart);
		let order = self
			.orders
			.create_order(chat, name, phone, address, &cart, instructions, totals)
			.await?;

		if let Err(e) = self.ledger.append_order(&LedgerRow::from_order(&order)).await {
			tracing::error!(order_id = %order.id, error = %e, "Failed to write order to ledger");
			if let Some(admin) = self.admin_chat {
				self.notifier
					.send(
						admin,
						OutboundMessage::text(format!(
							"Warning: order #{} was not written to the ledger: {}",
							order.id, e
						)),
					)
					.await;
			}
		}

		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::confirmation_text(
					&order,
					&self.store,
					&self.pricing,
				))
				.with_reply_menu(templates::main_menu()),
			)
			.await;

		if let Some(admin) = self.admin_chat {
			self.notifier
				.send(
					admin,
					OutboundMessage::text(templates::admin_alert_text(&order))
						.with_action_menu(templates::admin_actions_menu(&order.id)),
				)
				.await;
		}

		self.state.clear_cart(chat).await?;
		self.state.set_session(chat, SessionState::MainMenu).await
	}
}
