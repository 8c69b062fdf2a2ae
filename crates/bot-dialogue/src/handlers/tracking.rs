//! Order tracking handler: the customer's recent order history.

use crate::{templates, DialogueError, DialogueService};
use bot_types::{ChatId, OutboundMessage};

/// How many recent orders the history view shows.
const HISTORY_LIMIT: usize = 5;

impl DialogueService {
	/// Shows the customer's last few orders with their statuses.
	pub(crate) async fn track_orders(&self, chat: ChatId) -> Result<(), DialogueError> {
		let orders = self.orders.orders_for_customer(chat).await?;

		if orders.is_empty() {
			self.notifier
				.send(chat, OutboundMessage::text(templates::no_orders_text()))
				.await;
			return Ok(());
		}

		let recent = &orders[orders.len().saturating_sub(HISTORY_LIMIT)..];
		self.notifier
			.send(chat, OutboundMessage::text(templates::track_orders_text(recent)))
			.await;
		Ok(())
	}
}
