//! Chat types: inbound events, action tokens and outbound messages.
//!
//! Inbound chat activity is either free text or a button press carrying
//! an opaque action token. Tokens are parsed into the closed [`Action`]
//! enum exactly once, at the transport boundary, so handlers never see
//! raw token strings.

use crate::ids::ChatId;
use serde::{Deserialize, Serialize};

/// One inbound chat event, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
	/// Who sent the event. Used for admin authorization.
	pub sender: ChatId,
	/// Chat the event arrived in. Replies and session state key off this.
	pub chat: ChatId,
	/// The event payload.
	pub payload: EventPayload,
}

/// Payload of an inbound event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
	/// A free-text message line.
	Text(String),
	/// A button press, already parsed into an action.
	Action(Action),
}

/// A parsed action token.
///
/// The wire format is a fixed string prefix with the operand appended:
/// `add_<item>`, `ship_<order id>` and so on. Unrecognized tokens map to
/// [`Action::Unknown`] and fall through to the welcome catch-all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
	/// Add one unit of the named catalog item to the cart.
	AddItem(String),
	/// Show the cart.
	ViewCart,
	/// Return to the category menu.
	BackToCategories,
	/// Admin: mark the order as shipped.
	Ship(String),
	/// Admin: start cancelling the order (reason asked next).
	Cancel(String),
	/// Admin: mark the order as delivered.
	Deliver(String),
	/// Admin: show the full order record.
	Details(String),
	/// Token that matched no known prefix; carried for logging.
	Unknown(String),
}

impl Action {
	/// Parses a raw action token from the transport.
	pub fn parse(token: &str) -> Action {
		match token {
			"view_cart" => Action::ViewCart,
			"back_categories" => Action::BackToCategories,
			_ => {
				if let Some(item) = token.strip_prefix("add_") {
					Action::AddItem(item.to_string())
				} else if let Some(id) = token.strip_prefix("ship_") {
					Action::Ship(id.to_string())
				} else if let Some(id) = token.strip_prefix("cancel_") {
					Action::Cancel(id.to_string())
				} else if let Some(id) = token.strip_prefix("deliver_") {
					Action::Deliver(id.to_string())
				} else if let Some(id) = token.strip_prefix("details_") {
					Action::Details(id.to_string())
				} else {
					Action::Unknown(token.to_string())
				}
			},
		}
	}

	/// Renders the wire token for this action.
	pub fn token(&self) -> String {
		match self {
			Action::AddItem(item) => format!("add_{}", item),
			Action::ViewCart => "view_cart".to_string(),
			Action::BackToCategories => "back_categories".to_string(),
			Action::Ship(id) => format!("ship_{}", id),
			Action::Cancel(id) => format!("cancel_{}", id),
			Action::Deliver(id) => format!("deliver_{}", id),
			Action::Details(id) => format!("details_{}", id),
			Action::Unknown(raw) => raw.clone(),
		}
	}

	/// True for actions reserved to the admin operator.
	pub fn is_admin(&self) -> bool {
		matches!(
			self,
			Action::Ship(_) | Action::Cancel(_) | Action::Deliver(_) | Action::Details(_)
		)
	}
}

/// An outbound message, optionally carrying a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
	/// Message body. May contain minimal HTML markup.
	pub text: String,
	/// Persistent label-button grid replacing the keyboard.
	pub reply_menu: Option<ReplyMenu>,
	/// Inline buttons carrying action tokens.
	pub action_menu: Option<ActionMenu>,
}

impl OutboundMessage {
	/// Creates a plain text message without menus.
	pub fn text(text: impl Into<String>) -> Self {
		OutboundMessage {
			text: text.into(),
			reply_menu: None,
			action_menu: None,
		}
	}

	/// Attaches a reply menu to the message.
	pub fn with_reply_menu(mut self, menu: ReplyMenu) -> Self {
		self.reply_menu = Some(menu);
		self
	}

	/// Attaches an action menu to the message.
	pub fn with_action_menu(mut self, menu: ActionMenu) -> Self {
		self.action_menu = Some(menu);
		self
	}
}

/// A fixed grid of label buttons shown as the reply keyboard.
///
/// Pressing a button sends its label back as a plain text message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyMenu {
	/// Button labels, one inner vector per keyboard row.
	pub rows: Vec<Vec<String>>,
}

impl ReplyMenu {
	/// Builds a menu from rows of labels.
	pub fn new<R, L>(rows: R) -> Self
	where
		R: IntoIterator<Item = L>,
		L: IntoIterator<Item = &'static str>,
	{
		ReplyMenu {
			rows: rows
				.into_iter()
				.map(|row| row.into_iter().map(String::from).collect())
				.collect(),
		}
	}
}

/// A grid of inline buttons carrying action tokens.
///
/// Pressing a button routes its action back through the dialogue engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMenu {
	/// Buttons, one inner vector per row.
	pub rows: Vec<Vec<ActionButton>>,
}

impl ActionMenu {
	/// Total number of buttons across all rows.
	pub fn button_count(&self) -> usize {
		self.rows.iter().map(|row| row.len()).sum()
	}
}

/// A single inline button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionButton {
	/// Text shown on the button.
	pub label: String,
	/// Action dispatched when the button is pressed.
	pub action: Action,
}

impl ActionButton {
	/// Creates a button with the given label and action.
	pub fn new(label: impl Into<String>, action: Action) -> Self {
		ActionButton {
			label: label.into(),
			action,
		}
	}
}
