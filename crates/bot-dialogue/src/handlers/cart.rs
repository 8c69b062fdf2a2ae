//! Cart handlers: adding items, viewing and clearing the cart.

use crate::{templates, DialogueError, DialogueService};
use bot_types::{ChatId, OutboundMessage};

impl DialogueService {
	/// Adds one unit of an item to the cart and acknowledges it.
	pub(crate) async fn add_to_cart(
		&self,
		chat: ChatId,
		item_name: &str,
	) -> Result<(), DialogueError> {
		match self.state.add_item(chat, &self.catalog, item_name).await {
			Ok(item) => {
				self.notifier
					.send(
						chat,
						OutboundMessage::text(templates::added_to_cart_text(&item))
							.with_reply_menu(templates::after_add_menu()),
					)
					.await;
				Ok(())
			},
			Err(DialogueError::ItemNotFound(name)) => {
				tracing::warn!(chat = %chat, item = %name, "Add to cart for unknown item");
				self.notifier
					.send(
						chat,
						OutboundMessage::text("Item not found. Please select from the menu."),
					)
					.await;
				Ok(())
			},
			Err(e) => Err(e),
		}
	}

	/// Shows the cart with totals, or the empty-cart prompt.
	pub(crate) async fn show_cart(&self, chat: ChatId) -> Result<(), DialogueError> {
		let cart = self.state.cart(chat).await?;

		if cart.is_empty() {
			self.notifier
				.send(
					chat,
					OutboundMessage::text(templates::empty_cart_text())
						.with_reply_menu(templates::empty_cart_menu()),
				)
				.await;
			return Ok(());
		}

		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::cart_view_text(&cart, &self.pricing))
					.with_reply_menu(templates::cart_menu()),
			)
			.await;
		Ok(())
	}

	/// Empties the cart and sends the customer back to the categories.
	pub(crate) async fn clear_cart(&self, chat: ChatId) -> Result<(), DialogueError> {
		self.state.clear_cart(chat).await?;
		self.notifier
			.send(chat, OutboundMessage::text(templates::cart_cleared_text()))
			.await;
		self.show_categories(chat).await
	}
}
