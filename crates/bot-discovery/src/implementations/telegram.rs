//! Telegram long-poll event source.
//!
//! Pulls update batches with getUpdates, requesting only updates after
//! the highest sequence number seen so far. Text messages become text
//! payloads; callback queries are parsed into actions right here, at the
//! transport boundary. Pacing is fixed: a short pause after each batch,
//! a longer one after a transport error.

use crate::{DiscoveryError, DiscoveryInterface};
use bot_types::{Action, ChatId, EventPayload, InboundEvent};
use serde::Deserialize;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};

/// Extra client-side slack on top of the server-side long-poll wait.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// Telegram getUpdates response envelope.
#[derive(Debug, Deserialize)]
struct UpdatesResponse {
	ok: bool,
	#[serde(default)]
	result: Vec<Update>,
}

/// One update from the transport.
#[derive(Debug, Deserialize)]
struct Update {
	update_id: i64,
	message: Option<Message>,
	callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct Message {
	chat: Chat,
	from: Option<User>,
	text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
	id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
	id: i64,
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
	from: User,
	message: Option<Message>,
	data: Option<String>,
}

/// Maps one transport update to an inbound event, if it carries one.
fn event_from_update(update: Update) -> Option<InboundEvent> {
	if let Some(message) = update.message {
		let text = message.text?;
		let chat = ChatId(message.chat.id);
		return Some(InboundEvent {
			sender: message.from.map(|u| ChatId(u.id)).unwrap_or(chat),
			chat,
			payload: EventPayload::Text(text),
		});
	}

	if let Some(callback) = update.callback_query {
		let chat = ChatId(callback.message?.chat.id);
		let data = callback.data?;
		return Some(InboundEvent {
			sender: ChatId(callback.from.id),
			chat,
			payload: EventPayload::Action(Action::parse(&data)),
		});
	}

	None
}

/// State shared between the poller handle and its polling task.
struct PollerInner {
	client: reqwest::Client,
	updates_url: String,
	poll_timeout_secs: u64,
	idle_pause: Duration,
	error_pause: Duration,
	/// Highest update id seen; the next request asks for ids above it.
	last_update_id: AtomicI64,
}

impl PollerInner {
	/// Fetches one batch of updates and advances the sequence cursor.
	async fn fetch_batch(&self) -> Result<Vec<InboundEvent>, DiscoveryError> {
		let offset = self.last_update_id.load(Ordering::SeqCst) + 1;
		let response = self
			.client
			.get(&self.updates_url)
			.query(&[
				("timeout", self.poll_timeout_secs.to_string()),
				("offset", offset.to_string()),
			])
			.send()
			.await
			.map_err(|e| DiscoveryError::Connection(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			if status.as_u16() == 409 {
				tracing::error!(
					"Transport returned 409: another instance is polling with the same token"
				);
			}
			return Err(DiscoveryError::Connection(format!(
				"getUpdates returned {}",
				status
			)));
		}

		let updates: UpdatesResponse = response
			.json()
			.await
			.map_err(|e| DiscoveryError::Parse(e.to_string()))?;
		if !updates.ok {
			return Err(DiscoveryError::Connection(
				"getUpdates returned ok=false".to_string(),
			));
		}

		if let Some(highest) = updates.result.iter().map(|u| u.update_id).max() {
			self.last_update_id.fetch_max(highest, Ordering::SeqCst);
		}

		Ok(updates
			.result
			.into_iter()
			.filter_map(event_from_update)
			.collect())
	}
}

/// Event source backed by the Telegram Bot API long poll.
pub struct TelegramPoller {
	inner: Arc<PollerInner>,
	/// Stop signal for the running poll task, present while polling.
	stop: Mutex<Option<watch::Sender<bool>>>,
}

impl TelegramPoller {
	/// Creates a poller for the given bot token and pacing parameters.
	pub fn new(
		token: &str,
		poll_timeout_secs: u64,
		idle_pause: Duration,
		error_pause: Duration,
	) -> Result<Self, DiscoveryError> {
		let client = reqwest::Client::builder()
			.timeout(Duration::from_secs(poll_timeout_secs) + REQUEST_TIMEOUT_SLACK)
			.build()
			.map_err(|e| DiscoveryError::Connection(e.to_string()))?;

		Ok(Self {
			inner: Arc::new(PollerInner {
				client,
				updates_url: format!("https://api.telegram.org/bot{}/getUpdates", token),
				poll_timeout_secs,
				idle_pause,
				error_pause,
				last_update_id: AtomicI64::new(0),
			}),
			stop: Mutex::new(None),
		})
	}
}

#[async_trait::async_trait]
impl DiscoveryInterface for TelegramPoller {
	async fn start(
		&self,
		sender: mpsc::UnboundedSender<InboundEvent>,
	) -> Result<(), DiscoveryError> {
		let mut stop = self.stop.lock().await;
		if stop.is_some() {
			return Err(DiscoveryError::AlreadyPolling);
		}

		let (stop_tx, mut stop_rx) = watch::channel(false);
		*stop = Some(stop_tx);

		let inner = self.inner.clone();
		tokio::spawn(async move {
			loop {
				if *stop_rx.borrow() {
					break;
				}

				let pause = match inner.fetch_batch().await {
					Ok(events) => {
						for event in events {
							if sender.send(event).is_err() {
								// Engine is gone; nothing left to do.
								return;
							}
						}
						inner.idle_pause
					},
					Err(e) => {
						tracing::error!(error = %e, "Failed to poll for updates");
						inner.error_pause
					},
				};

				tokio::select! {
					_ = tokio::time::sleep(pause) => {},
					_ = stop_rx.changed() => break,
				}
			}
			tracing::info!("Stopped polling for updates");
		});

		Ok(())
	}

	async fn stop(&self) -> Result<(), DiscoveryError> {
		if let Some(stop_tx) = self.stop.lock().await.take() {
			// Receiver may already be gone; that is a stop too.
			let _ = stop_tx.send(true);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse_updates(json: &str) -> UpdatesResponse {
		serde_json::from_str(json).unwrap()
	}

	#[test]
	fn test_text_message_becomes_text_event() {
		let updates = parse_updates(
			r#"{"ok":true,"result":[{"update_id":100,
				"message":{"chat":{"id":7},"from":{"id":7},"text":"My Cart"}}]}"#,
		);

		let events: Vec<_> = updates
			.result
			.into_iter()
			.filter_map(event_from_update)
			.collect();
		assert_eq!(
			events,
			vec![InboundEvent {
				sender: ChatId(7),
				chat: ChatId(7),
				payload: EventPayload::Text("My Cart".to_string()),
			}]
		);
	}

	#[test]
	fn test_callback_query_is_parsed_at_the_boundary() {
		let updates = parse_updates(
			r#"{"ok":true,"result":[{"update_id":101,
				"callback_query":{"from":{"id":999},
					"message":{"chat":{"id":7},"text":"Choose action:"},
					"data":"ship_ORD1700000000-001"}}]}"#,
		);

		let events: Vec<_> = updates
			.result
			.into_iter()
			.filter_map(event_from_update)
			.collect();
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].sender, ChatId(999));
		assert_eq!(events[0].chat, ChatId(7));
		assert_eq!(
			events[0].payload,
			EventPayload::Action(Action::Ship("ORD1700000000-001".to_string()))
		);
	}

	#[test]
	fn test_updates_without_payload_are_skipped() {
		let updates = parse_updates(
			r#"{"ok":true,"result":[
				{"update_id":102,"message":{"chat":{"id":7},"from":{"id":7}}},
				{"update_id":103}
			]}"#,
		);

		let events: Vec<_> = updates
			.result
			.into_iter()
			.filter_map(event_from_update)
			.collect();
		assert!(events.is_empty());
	}

	#[test]
	fn test_sender_falls_back_to_chat_id() {
		let updates = parse_updates(
			r#"{"ok":true,"result":[{"update_id":104,
				"message":{"chat":{"id":42},"text":"/start"}}]}"#,
		);

		let events: Vec<_> = updates
			.result
			.into_iter()
			.filter_map(event_from_update)
			.collect();
		assert_eq!(events[0].sender, ChatId(42));
	}

	#[test]
	fn test_empty_result_deserializes() {
		let updates = parse_updates(r#"{"ok":true,"result":[]}"#);
		assert!(updates.ok);
		assert!(updates.result.is_empty());
	}
}
