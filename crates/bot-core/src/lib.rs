//! Core engine for the ordering bot.
//!
//! The engine owns the event loop: it starts the discovery sources,
//! drains their channel one event at a time and hands each event to the
//! dialogue service. Processing is strictly sequential, so cart, session
//! and order state never see concurrent mutation. A failing event is
//! logged and answered with the recovery path; it never stops the loop.

use bot_dialogue::DialogueService;
use bot_discovery::DiscoveryService;
use bot_types::{EventPayload, InboundEvent};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur while running the engine.
#[derive(Debug, Error)]
pub enum EngineError {
	/// Error from the discovery service.
	#[error("Discovery error: {0}")]
	Discovery(String),
}

/// The bot engine.
pub struct Engine {
	discovery: Arc<DiscoveryService>,
	dialogue: Arc<DialogueService>,
}

impl Engine {
	/// Creates a new Engine over the given services.
	pub fn new(discovery: Arc<DiscoveryService>, dialogue: Arc<DialogueService>) -> Self {
		Self {
			discovery,
			dialogue,
		}
	}

	/// Main execution loop.
	///
	/// Runs until Ctrl+C or until every discovery source has shut its
	/// end of the channel. Events are processed to completion in receipt
	/// order; there is no concurrent handling.
	pub async fn run(&self) -> Result<(), EngineError> {
		let (event_tx, mut event_rx) = mpsc::unbounded_channel();
		self.discovery
			.start_all(event_tx)
			.await
			.map_err(|e| EngineError::Discovery(e.to_string()))?;

		loop {
			tokio::select! {
				maybe_event = event_rx.recv() => {
					match maybe_event {
						Some(event) => self.handle_event(event).await,
						None => break,
					}
				}

				// Shutdown signal
				_ = tokio::signal::ctrl_c() => {
					break;
				}
			}
		}

		self.discovery
			.stop_all()
			.await
			.map_err(|e| EngineError::Discovery(e.to_string()))?;

		Ok(())
	}

	/// Handles one event, routing failures through the recovery path.
	async fn handle_event(&self, event: InboundEvent) {
		match &event.payload {
			EventPayload::Text(text) => {
				tracing::info!(chat = %event.chat, text = %text, "Message received");
			},
			EventPayload::Action(action) => {
				tracing::info!(chat = %event.chat, action = %action.token(), "Action received");
			},
		}

		if let Err(e) = self.dialogue.handle_event(&event).await {
			tracing::error!(chat = %event.chat, error = %e, "Event handling failed");
			self.dialogue.fail_safe(event.chat).await;
		}
	}
}
