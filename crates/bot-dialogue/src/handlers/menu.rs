//! Menu handlers: welcome, category browsing and store information.

use crate::{templates, DialogueError, DialogueService};
use bot_types::{ChatId, OutboundMessage, SessionState};

impl DialogueService {
	/// Shows the welcome presentation and resets the session.
	pub(crate) async fn show_welcome(&self, chat: ChatId) -> Result<(), DialogueError> {
		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::welcome_text(&self.store, &self.pricing))
					.with_reply_menu(templates::main_menu()),
			)
			.await;
		self.state.set_session(chat, SessionState::MainMenu).await
	}

	/// Shows the category picker.
	pub(crate) async fn show_categories(&self, chat: ChatId) -> Result<(), DialogueError> {
		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::categories_text())
					.with_reply_menu(templates::categories_menu(&self.catalog)),
			)
			.await;
		Ok(())
	}

	/// Shows one category's item list with add-to-cart buttons.
	pub(crate) async fn show_category_items(
		&self,
		chat: ChatId,
		category_name: &str,
	) -> Result<(), DialogueError> {
		let Some(category) = self.catalog.category(category_name) else {
			self.notifier
				.send(
					chat,
					OutboundMessage::text("Category not found. Please choose from the menu."),
				)
				.await;
			return Ok(());
		};

		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::category_items_text(category))
					.with_action_menu(templates::category_items_menu(category)),
			)
			.await;
		self.state
			.set_session(
				chat,
				SessionState::BrowsingCategory {
					category: category_name.to_string(),
				},
			)
			.await
	}

	/// Shows the store contact card.
	pub(crate) async fn show_contact(&self, chat: ChatId) -> Result<(), DialogueError> {
		self.notifier
			.send(chat, OutboundMessage::text(templates::contact_text(&self.store)))
			.await;
		Ok(())
	}

	/// Shows the store information card.
	pub(crate) async fn show_store_info(&self, chat: ChatId) -> Result<(), DialogueError> {
		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::store_info_text(&self.store, &self.pricing)),
			)
			.await;
		Ok(())
	}
}
