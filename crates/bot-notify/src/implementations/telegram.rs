//! Telegram Bot API transport for outbound messages.
//!
//! Renders reply menus as persistent keyboards and action menus as
//! inline keyboards whose buttons carry action tokens in their callback
//! data. One sendMessage call per message, no retries.

use crate::{NotifyError, NotifyInterface};
use async_trait::async_trait;
use bot_types::{ActionMenu, ChatId, OutboundMessage, ReplyMenu};
use serde::Serialize;
use std::time::Duration;

/// Timeout for one sendMessage call.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Telegram sendMessage request body.
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
	chat_id: i64,
	text: &'a str,
	parse_mode: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	reply_markup: Option<ReplyMarkup>,
}

/// Telegram reply_markup payload, either keyboard flavor.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ReplyMarkup {
	Keyboard {
		keyboard: Vec<Vec<KeyboardButton>>,
		resize_keyboard: bool,
		one_time_keyboard: bool,
	},
	Inline {
		inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
	},
}

/// One button of a persistent reply keyboard.
#[derive(Debug, Serialize)]
struct KeyboardButton {
	text: String,
}

/// One button of an inline keyboard.
#[derive(Debug, Serialize)]
struct InlineKeyboardButton {
	text: String,
	callback_data: String,
}

impl ReplyMarkup {
	fn from_reply_menu(menu: &ReplyMenu) -> Self {
		ReplyMarkup::Keyboard {
			keyboard: menu
				.rows
				.iter()
				.map(|row| {
					row.iter()
						.map(|label| KeyboardButton {
							text: label.clone(),
						})
						.collect()
				})
				.collect(),
			resize_keyboard: true,
			one_time_keyboard: false,
		}
	}

	fn from_action_menu(menu: &ActionMenu) -> Self {
		ReplyMarkup::Inline {
			inline_keyboard: menu
				.rows
				.iter()
				.map(|row| {
					row.iter()
						.map(|button| InlineKeyboardButton {
							text: button.label.clone(),
							callback_data: button.action.token(),
						})
						.collect()
				})
				.collect(),
		}
	}
}

/// Outbound transport backed by the Telegram Bot API.
pub struct TelegramNotifier {
	client: reqwest::Client,
	send_url: String,
}

impl TelegramNotifier {
	/// Creates a notifier for the given bot token.
	pub fn new(token: &str) -> Result<Self, NotifyError> {
		let client = reqwest::Client::builder()
			.timeout(SEND_TIMEOUT)
			.build()
			.map_err(|e| NotifyError::Network(e.to_string()))?;

		Ok(Self {
			client,
			send_url: format!("https://api.telegram.org/bot{}/sendMessage", token),
		})
	}
}

#[async_trait]
impl NotifyInterface for TelegramNotifier {
	async fn deliver(
		&self,
		recipient: ChatId,
		message: &OutboundMessage,
	) -> Result<(), NotifyError> {
		// Reply menu takes precedence when both are set, matching the
		// transport's one-reply_markup-per-message constraint.
		let reply_markup = match (&message.reply_menu, &message.action_menu) {
			(Some(menu), _) => Some(ReplyMarkup::from_reply_menu(menu)),
			(None, Some(menu)) => Some(ReplyMarkup::from_action_menu(menu)),
			(None, None) => None,
		};

		let request = SendMessageRequest {
			chat_id: recipient.0,
			text: &message.text,
			parse_mode: "HTML",
			reply_markup,
		};

		let response = self
			.client
			.post(&self.send_url)
			.json(&request)
			.send()
			.await
			.map_err(|e| NotifyError::Network(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(NotifyError::Api {
				status: status.as_u16(),
				body,
			});
		}

		Ok(())
	}
}
