//! Dialogue engine for the ordering bot.
//!
//! Interprets one inbound event at a time against the sender's current
//! session state, mutates cart and session state, and drives the order
//! tracker, notifier and ledger as needed. Dispatch priority, highest
//! first: global commands, known menu labels, category names, parsed
//! actions, session-driven free text, and finally the welcome catch-all.

use bot_ledger::LedgerService;
use bot_notify::NotifierService;
use bot_order::{OrderError, OrderTracker};
use bot_storage::{StorageError, StorageService};
use bot_types::{
	Action, Catalog, ChatId, EventPayload, InboundEvent, OutboundMessage, PricingRule,
	SessionState, StoreProfile,
};
use std::sync::Arc;
use thiserror::Error;

pub mod handlers;
pub mod state;
pub mod templates;

use state::CustomerStateStore;

/// Errors that can occur while handling a dialogue event.
#[derive(Debug, Error)]
pub enum DialogueError {
	/// Error that occurs when an item is absent from every category.
	#[error("Item not found: {0}")]
	ItemNotFound(String),
	/// Error that occurs in the state store.
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
	/// Error that occurs in the order tracker.
	#[error("Order error: {0}")]
	Order(String),
}

impl From<OrderError> for DialogueError {
	fn from(err: OrderError) -> Self {
		DialogueError::Order(err.to_string())
	}
}

/// The dialogue engine.
///
/// Stateless by itself: every per-customer fact lives behind the
/// [`CustomerStateStore`], so processing is a pure mapping from
/// (session state, event) to (new state, side effects).
pub struct DialogueService {
	catalog: Catalog,
	pricing: PricingRule,
	store: StoreProfile,
	state: CustomerStateStore,
	orders: Arc<OrderTracker>,
	notifier: Arc<NotifierService>,
	ledger: Arc<LedgerService>,
	admin_chat: Option<ChatId>,
}

impl DialogueService {
	/// Creates a new DialogueService over the given service seams.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		catalog: Catalog,
		pricing: PricingRule,
		store: StoreProfile,
		storage: Arc<StorageService>,
		orders: Arc<OrderTracker>,
		notifier: Arc<NotifierService>,
		ledger: Arc<LedgerService>,
		admin_chat: Option<ChatId>,
	) -> Self {
		Self {
			catalog,
			pricing,
			store,
			state: CustomerStateStore::new(storage),
			orders,
			notifier,
			ledger,
			admin_chat,
		}
	}

	/// Handles one inbound event to completion.
	pub async fn handle_event(&self, event: &InboundEvent) -> Result<(), DialogueError> {
		match &event.payload {
			EventPayload::Text(text) => self.handle_text(event.chat, text.trim()).await,
			EventPayload::Action(action) => {
				self.handle_action(event.sender, event.chat, action).await
			},
		}
	}

	/// Dispatches a free-text message.
	async fn handle_text(&self, chat: ChatId, text: &str) -> Result<(), DialogueError> {
		// 1. Global commands always win and reset the session.
		if text == "/start" || text == "/reset" {
			return self.show_welcome(chat).await;
		}

		// 2. Known menu labels are state-independent shortcuts.
		match text {
			templates::LABEL_SHOP_GROCERIES
			| templates::LABEL_START_SHOPPING
			| templates::LABEL_CONTINUE_SHOPPING
			| templates::LABEL_ADD_MORE_ITEMS => return self.show_categories(chat).await,
			templates::LABEL_MY_CART | templates::LABEL_VIEW_CART => {
				return self.show_cart(chat).await
			},
			templates::LABEL_TRACK_ORDER => return self.track_orders(chat).await,
			templates::LABEL_MAIN_MENU => return self.show_welcome(chat).await,
			templates::LABEL_CLEAR_CART => return self.clear_cart(chat).await,
			templates::LABEL_CHECKOUT_NOW | templates::LABEL_CHECKOUT => {
				return self.start_checkout(chat).await
			},
			templates::LABEL_CONTACT_STORE => return self.show_contact(chat).await,
			templates::LABEL_STORE_INFO => return self.show_store_info(chat).await,
			_ => {},
		}

		// 3. Category names open that category's item list.
		if self.catalog.category(text).is_some() {
			return self.show_category_items(chat, text).await;
		}

		// 5. Otherwise the session step decides what the text means.
		match self.state.session(chat).await? {
			SessionState::AwaitingName => self.collect_name(chat, text).await,
			SessionState::AwaitingPhone { name } => self.collect_phone(chat, name, text).await,
			SessionState::AwaitingAddress { name, phone } => {
				self.collect_address(chat, name, phone, text).await
			},
			SessionState::AwaitingInstructions {
				name,
				phone,
				address,
			} => {
				self.finalize_checkout(chat, name, phone, address, text)
					.await
			},
			SessionState::AwaitingCancelReason { order_id } => {
				self.finish_cancellation(chat, &order_id, text).await
			},
			// 6. Unmatched input falls back to the welcome presentation.
			SessionState::MainMenu | SessionState::BrowsingCategory { .. } => {
				self.show_welcome(chat).await
			},
		}
	}

	/// Dispatches a parsed action token.
	async fn handle_action(
		&self,
		sender: ChatId,
		chat: ChatId,
		action: &Action,
	) -> Result<(), DialogueError> {
		if action.is_admin() && !self.is_admin(sender) {
			tracing::warn!(sender = %sender, action = %action.token(), "Unauthorized admin action");
			self.notifier
				.send(chat, OutboundMessage::text(templates::UNAUTHORIZED))
				.await;
			return Ok(());
		}

		match action {
			Action::AddItem(item) => self.add_to_cart(chat, item).await,
			Action::ViewCart => self.show_cart(chat).await,
			Action::BackToCategories => self.show_categories(chat).await,
			Action::Ship(order_id) => self.admin_ship(chat, order_id).await,
			Action::Cancel(order_id) => self.admin_start_cancellation(chat, order_id).await,
			Action::Deliver(order_id) => self.admin_deliver(chat, order_id).await,
			Action::Details(order_id) => self.admin_details(chat, order_id).await,
			Action::Unknown(raw) => {
				tracing::debug!(token = %raw, "Unknown action token");
				self.show_welcome(chat).await
			},
		}
	}

	/// True when the sender is the configured admin operator.
	fn is_admin(&self, sender: ChatId) -> bool {
		self.admin_chat == Some(sender)
	}

	/// Last-resort recovery after a handler error.
	///
	/// Sends a generic apology, resets the session to the main menu and
	/// swallows any further failure; the event loop must keep running.
	pub async fn fail_safe(&self, chat: ChatId) {
		self.notifier
			.send(
				chat,
				OutboundMessage::text(templates::APOLOGY)
					.with_reply_menu(templates::main_menu()),
			)
			.await;
		if let Err(e) = self.state.set_session(chat, SessionState::MainMenu).await {
			tracing::error!(chat = %chat, error = %e, "Failed to reset session during recovery");
		}
	}
}
