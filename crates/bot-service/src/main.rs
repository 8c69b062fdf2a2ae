//! Main entry point for the FreshMart ordering bot.
//!
//! This binary wires the concrete implementations together: in-memory
//! state storage, the Telegram transport for both directions, and the
//! optional HTTP order ledger. Missing optional collaborators degrade
//! with a warning; a missing transport token is fatal at startup.

use bot_config::Config;
use bot_core::Engine;
use bot_dialogue::DialogueService;
use bot_discovery::implementations::telegram::TelegramPoller;
use bot_discovery::DiscoveryService;
use bot_ledger::implementations::disabled::DisabledLedger;
use bot_ledger::implementations::http::HttpLedger;
use bot_ledger::{LedgerInterface, LedgerService};
use bot_notify::implementations::telegram::TelegramNotifier;
use bot_notify::NotifierService;
use bot_order::OrderTracker;
use bot_storage::implementations::memory::MemoryStorage;
use bot_storage::StorageService;
use bot_types::ChatId;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Command-line arguments for the bot service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "bot.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the bot service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads and validates configuration from file
/// 4. Wires the engine with all implementations
/// 5. Runs the bot until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Starting grocery ordering bot");

	// Load configuration
	let config = Config::from_file(&args.config)?;
	tracing::info!("Loaded configuration [{}]", config.shop.name);

	// Wire the engine with implementations
	let engine = build_bot(&config).await?;

	tracing::info!("Ready to take orders");
	engine.run().await?;

	tracing::info!("Stopped bot");
	Ok(())
}

/// Wires the engine with the configured implementations.
///
/// There is exactly one real implementation per seam today; the traits
/// in each crate are the swap points for future backends.
async fn build_bot(config: &Config) -> Result<Engine, Box<dyn std::error::Error>> {
	// State store
	let storage = match config.storage.backend.as_str() {
		"memory" => Arc::new(StorageService::new(Box::new(MemoryStorage::new()))),
		other => return Err(format!("Unknown storage backend: {}", other).into()),
	};

	// Outbound transport
	let notifier = Arc::new(NotifierService::new(Box::new(TelegramNotifier::new(
		&config.telegram.token,
	)?)));

	// Order ledger, disabled when unconfigured
	let ledger_store: Box<dyn LedgerInterface> = match &config.ledger {
		Some(ledger) => {
			tracing::info!("Order ledger integration: active");
			Box::new(HttpLedger::new(
				ledger.url.clone(),
				ledger.credential.clone(),
			)?)
		},
		None => {
			tracing::warn!("Order ledger not configured, bookkeeping disabled");
			Box::new(DisabledLedger)
		},
	};
	let ledger = Arc::new(LedgerService::new(ledger_store));
	ledger.ensure_headers().await;

	// Admin features degrade when no admin chat is configured
	let admin_chat = config.telegram.admin_chat_id.map(ChatId);
	if admin_chat.is_none() {
		tracing::warn!("Admin chat not configured, admin features disabled");
	}

	let orders = Arc::new(OrderTracker::new(
		storage.clone(),
		notifier.clone(),
		ledger.clone(),
		config.shop.store_profile(),
	));

	let dialogue = Arc::new(DialogueService::new(
		config.catalog(),
		config.shop.pricing_rule(),
		config.shop.store_profile(),
		storage,
		orders,
		notifier,
		ledger,
		admin_chat,
	));

	// Inbound transport
	let polling = &config.telegram.polling;
	let poller = TelegramPoller::new(
		&config.telegram.token,
		polling.poll_timeout_secs,
		Duration::from_millis(polling.idle_pause_ms),
		Duration::from_secs(polling.error_pause_secs),
	)?;
	let discovery = Arc::new(DiscoveryService::new(vec![Box::new(poller)]));

	Ok(Engine::new(discovery, dialogue))
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Creates a minimal test configuration for unit testing
	fn create_test_config() -> Config {
		r#"
[telegram]
token = "123:testtoken"
admin_chat_id = 999
"#
		.parse()
		.unwrap()
	}

	#[test]
	fn test_args_default_values() {
		let args = Args {
			config: PathBuf::from("bot.toml"),
			log_level: "info".to_string(),
		};

		assert_eq!(args.config, PathBuf::from("bot.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[tokio::test]
	async fn test_build_bot_with_minimal_config() {
		let config = create_test_config();

		let result = build_bot(&config).await;
		assert!(result.is_ok(), "Failed to build bot: {:?}", result.err());
	}

	#[tokio::test]
	async fn test_build_bot_rejects_unknown_storage_backend() {
		let config: Config = r#"
[telegram]
token = "123:testtoken"

[storage]
backend = "redis"
"#
		.parse()
		.unwrap();

		let result = build_bot(&config).await;
		assert!(result.is_err());
	}

	#[tokio::test]
	async fn test_build_bot_with_file_config() {
		let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
		let config_path = temp_dir.path().join("test_bot.toml");

		let config_content = r#"
[telegram]
token = "123:filetoken"
admin_chat_id = 42

[telegram.polling]
poll_timeout_secs = 10
idle_pause_ms = 100
error_pause_secs = 1

[shop]
name = "TestMart"
free_delivery_threshold = 25
delivery_fee = 2
"#;

		std::fs::write(&config_path, config_content).expect("Failed to write config");

		let config = Config::from_file(&config_path).expect("Failed to load config");
		assert_eq!(config.shop.name, "TestMart");
		assert_eq!(config.telegram.polling.poll_timeout_secs, 10);

		let result = build_bot(&config).await;
		assert!(result.is_ok());
	}
}
