//! Message delivery module for the ordering bot.
//!
//! This module handles outbound chat messages: rendered text plus an
//! optional reply or action menu, sent to a recipient over an external
//! chat transport. Chat delivery is inherently best-effort, so the
//! service swallows failures after logging them and reports only a
//! boolean success signal to callers.

use async_trait::async_trait;
use bot_types::{ChatId, OutboundMessage};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod telegram;
}

/// Errors that can occur during message delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error returned by the chat transport API.
	#[error("Transport API error ({status}): {body}")]
	Api {
		/// HTTP status code returned by the transport.
		status: u16,
		/// Response body for diagnostics.
		body: String,
	},
}

/// Trait defining the interface for outbound message transports.
///
/// Implementations render the message and its menus into the transport's
/// wire format and deliver it to the recipient.
#[async_trait]
pub trait NotifyInterface: Send + Sync {
	/// Delivers one message to the recipient.
	async fn deliver(&self, recipient: ChatId, message: &OutboundMessage)
		-> Result<(), NotifyError>;
}

/// Service that delivers messages best-effort.
///
/// The NotifierService wraps a transport implementation and converts
/// delivery failures into log entries. Callers that need to react to a
/// failure can check the returned boolean; nothing is ever raised.
pub struct NotifierService {
	/// The underlying transport implementation.
	transport: Box<dyn NotifyInterface>,
}

impl NotifierService {
	/// Creates a new NotifierService with the specified transport.
	pub fn new(transport: Box<dyn NotifyInterface>) -> Self {
		Self { transport }
	}

	/// Sends a message, logging and swallowing any delivery failure.
	///
	/// Returns true when the transport accepted the message.
	pub async fn send(&self, recipient: ChatId, message: OutboundMessage) -> bool {
		match self.transport.deliver(recipient, &message).await {
			Ok(()) => true,
			Err(e) => {
				tracing::error!(recipient = %recipient, error = %e, "Failed to send message");
				false
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;

	struct FailingTransport {
		attempts: Arc<AtomicUsize>,
	}

	#[async_trait]
	impl NotifyInterface for FailingTransport {
		async fn deliver(
			&self,
			_recipient: ChatId,
			_message: &OutboundMessage,
		) -> Result<(), NotifyError> {
			self.attempts.fetch_add(1, Ordering::SeqCst);
			Err(NotifyError::Network("connection reset".to_string()))
		}
	}

	#[tokio::test]
	async fn test_send_swallows_failures() {
		let attempts = Arc::new(AtomicUsize::new(0));
		let service = NotifierService::new(Box::new(FailingTransport {
			attempts: attempts.clone(),
		}));

		let delivered = service
			.send(ChatId(7), OutboundMessage::text("hello"))
			.await;

		assert!(!delivered);
		// Exactly one attempt, no retries.
		assert_eq!(attempts.load(Ordering::SeqCst), 1);
	}
}
