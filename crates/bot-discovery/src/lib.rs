//! Inbound event discovery module for the ordering bot.
//!
//! This module handles the discovery of new chat events from the
//! transport. It provides abstractions for different event sources;
//! discovered events are pushed through a channel to the engine, which
//! processes them strictly in receipt order.

use async_trait::async_trait;
use bot_types::InboundEvent;
use thiserror::Error;
use tokio::sync::mpsc;

/// Re-export implementations
pub mod implementations {
	pub mod telegram;
}

/// Errors that can occur during event discovery operations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
	/// Error that occurs when talking to the transport fails.
	#[error("Connection error: {0}")]
	Connection(String),
	/// Error that occurs when parsing transport payloads fails.
	#[error("Parse error: {0}")]
	Parse(String),
	/// Error that occurs when trying to start an already active source.
	#[error("Already polling")]
	AlreadyPolling,
}

/// Trait defining the interface for inbound event sources.
///
/// This trait must be implemented by any event source that wants to
/// feed the dialogue engine. Discovered events are sent through the
/// provided channel; the source keeps polling until [`stop`] is called.
///
/// [`stop`]: DiscoveryInterface::stop
#[async_trait]
pub trait DiscoveryInterface: Send + Sync {
	/// Starts polling for new events from this source.
	async fn start(
		&self,
		sender: mpsc::UnboundedSender<InboundEvent>,
	) -> Result<(), DiscoveryError>;

	/// Stops polling for new events from this source.
	///
	/// The stop signal is checked between batches, never mid-batch, so
	/// an event that was already received is always delivered.
	async fn stop(&self) -> Result<(), DiscoveryError>;
}

/// Service that manages the configured event sources.
pub struct DiscoveryService {
	/// Collection of event sources to poll.
	sources: Vec<Box<dyn DiscoveryInterface>>,
}

impl DiscoveryService {
	/// Creates a new DiscoveryService with the specified sources.
	pub fn new(sources: Vec<Box<dyn DiscoveryInterface>>) -> Self {
		Self { sources }
	}

	/// Starts polling on all configured sources.
	///
	/// All discovered events from any source are sent through the
	/// provided channel. If any source fails to start, the entire
	/// operation fails.
	pub async fn start_all(
		&self,
		sender: mpsc::UnboundedSender<InboundEvent>,
	) -> Result<(), DiscoveryError> {
		for source in &self.sources {
			source.start(sender.clone()).await?;
		}
		Ok(())
	}

	/// Stops polling on all active sources.
	pub async fn stop_all(&self) -> Result<(), DiscoveryError> {
		for source in &self.sources {
			source.stop().await?;
		}
		Ok(())
	}
}
