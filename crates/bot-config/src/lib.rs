//! Configuration module for the ordering bot.
//!
//! This module provides structures and utilities for managing bot
//! configuration. It supports loading configuration from TOML files with
//! `${ENV_VAR}` placeholders resolved from the environment, so secrets
//! like the transport token never live in the file itself.
//!
//! Validation policy: a missing transport token is fatal at startup;
//! the admin chat and the ledger degrade gracefully and are checked by
//! the service at wiring time, not here.

use bot_types::{Catalog, PricingRule, StoreProfile};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the ordering bot.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Chat transport configuration.
	pub telegram: TelegramConfig,
	/// Configuration for the state store backend.
	#[serde(default)]
	pub storage: StorageConfig,
	/// Configuration for the external order ledger. Absent = disabled.
	pub ledger: Option<LedgerConfig>,
	/// Store identity and delivery pricing.
	#[serde(default)]
	pub shop: ShopConfig,
	/// Catalog override. Absent = built-in catalog.
	pub catalog: Option<Catalog>,
}

/// Configuration for the chat transport.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
	/// Bot API token. Required; inject via `${TELEGRAM_TOKEN}`.
	pub token: String,
	/// Chat id of the admin operator. Absent disables admin features.
	pub admin_chat_id: Option<i64>,
	/// Long-poll pacing parameters.
	#[serde(default)]
	pub polling: PollingConfig,
}

/// Long-poll pacing parameters for the transport.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
	/// Server-side long-poll wait, in seconds.
	#[serde(default = "default_poll_timeout_secs")]
	pub poll_timeout_secs: u64,
	/// Pause between successful poll batches, in milliseconds.
	#[serde(default = "default_idle_pause_ms")]
	pub idle_pause_ms: u64,
	/// Pause after a transport error before retrying, in seconds.
	#[serde(default = "default_error_pause_secs")]
	pub error_pause_secs: u64,
}

impl Default for PollingConfig {
	fn default() -> Self {
		PollingConfig {
			poll_timeout_secs: default_poll_timeout_secs(),
			idle_pause_ms: default_idle_pause_ms(),
			error_pause_secs: default_error_pause_secs(),
		}
	}
}

/// Returns the default long-poll wait in seconds.
fn default_poll_timeout_secs() -> u64 {
	30
}

/// Returns the default pause between poll batches in milliseconds.
fn default_idle_pause_ms() -> u64 {
	1000
}

/// Returns the default pause after a transport error in seconds.
fn default_error_pause_secs() -> u64 {
	5
}

/// Configuration for the state store backend.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
	/// Which backend implementation to use.
	#[serde(default = "default_storage_backend")]
	pub backend: String,
}

impl Default for StorageConfig {
	fn default() -> Self {
		StorageConfig {
			backend: default_storage_backend(),
		}
	}
}

/// Returns the default state store backend name.
fn default_storage_backend() -> String {
	"memory".to_string()
}

/// Configuration for the external order ledger.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
	/// Row-store endpoint URL.
	pub url: String,
	/// Optional bearer credential for the endpoint.
	pub credential: Option<String>,
}

/// Store identity and delivery pricing.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
	/// Store name shown in messages.
	#[serde(default = "default_shop_name")]
	pub name: String,
	/// Contact phone shown in messages.
	#[serde(default = "default_contact_phone")]
	pub contact_phone: String,
	/// Store street address.
	#[serde(default = "default_shop_address")]
	pub address: String,
	/// Opening hours line.
	#[serde(default = "default_shop_hours")]
	pub hours: String,
	/// Subtotal at or above which delivery is free.
	#[serde(default = "default_free_delivery_threshold")]
	pub free_delivery_threshold: Decimal,
	/// Flat delivery fee below the threshold.
	#[serde(default = "default_delivery_fee")]
	pub delivery_fee: Decimal,
}

impl Default for ShopConfig {
	fn default() -> Self {
		ShopConfig {
			name: default_shop_name(),
			contact_phone: default_contact_phone(),
			address: default_shop_address(),
			hours: default_shop_hours(),
			free_delivery_threshold: default_free_delivery_threshold(),
			delivery_fee: default_delivery_fee(),
		}
	}
}

fn default_shop_name() -> String {
	"FreshMart".to_string()
}

fn default_contact_phone() -> String {
	"555-1234".to_string()
}

fn default_shop_address() -> String {
	"123 Main Street".to_string()
}

fn default_shop_hours() -> String {
	"7 AM - 10 PM Daily".to_string()
}

fn default_free_delivery_threshold() -> Decimal {
	Decimal::new(50, 0)
}

fn default_delivery_fee() -> Decimal {
	Decimal::new(5, 0)
}

impl ShopConfig {
	/// The store profile used in customer-facing copy.
	pub fn store_profile(&self) -> StoreProfile {
		StoreProfile {
			name: self.name.clone(),
			contact_phone: self.contact_phone.clone(),
			address: self.address.clone(),
			hours: self.hours.clone(),
		}
	}

	/// The pricing rule shared by every component showing totals.
	pub fn pricing_rule(&self) -> PricingRule {
		PricingRule {
			free_delivery_threshold: self.free_delivery_threshold,
			delivery_fee: self.delivery_fee,
		}
	}
}

impl Config {
	/// Loads configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Validates the configuration after parsing.
	///
	/// Only the transport token is required; everything else degrades.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.telegram.token.trim().is_empty() {
			return Err(ConfigError::Validation(
				"telegram.token must not be empty".to_string(),
			));
		}
		if let Some(ledger) = &self.ledger {
			if ledger.url.trim().is_empty() {
				return Err(ConfigError::Validation(
					"ledger.url must not be empty when the ledger section is present".to_string(),
				));
			}
		}
		Ok(())
	}

	/// The catalog to serve: the configured one, or the built-in.
	pub fn catalog(&self) -> Catalog {
		self.catalog.clone().unwrap_or_default()
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

/// Resolves `${VAR}` and `${VAR:-default}` placeholders from the
/// environment.
///
/// A placeholder without a default for an unset variable is an error, so
/// a missing required secret fails loudly at startup rather than ending
/// up as a literal `${...}` string.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut replacements = Vec::new();
	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	let mut result = input.to_string();
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(*start..*end, value);
	}

	Ok(result)
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINIMAL: &str = r#"
[telegram]
token = "123:abc"
"#;

	#[test]
	fn test_minimal_config_defaults() {
		let config: Config = MINIMAL.parse().unwrap();

		assert_eq!(config.telegram.token, "123:abc");
		assert!(config.telegram.admin_chat_id.is_none());
		assert_eq!(config.telegram.polling.poll_timeout_secs, 30);
		assert_eq!(config.telegram.polling.idle_pause_ms, 1000);
		assert_eq!(config.telegram.polling.error_pause_secs, 5);
		assert_eq!(config.storage.backend, "memory");
		assert!(config.ledger.is_none());
		assert_eq!(config.shop.name, "FreshMart");
		assert_eq!(config.shop.delivery_fee, Decimal::new(5, 0));
		assert_eq!(
			config.shop.free_delivery_threshold,
			Decimal::new(50, 0)
		);
	}

	#[test]
	fn test_empty_token_rejected() {
		let result: Result<Config, _> = r#"
[telegram]
token = ""
"#
		.parse::<Config>();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("TEST_BOT_TOKEN", "999:xyz");

		let config: Config = r#"
[telegram]
token = "${TEST_BOT_TOKEN}"
"#
		.parse()
		.unwrap();
		assert_eq!(config.telegram.token, "999:xyz");

		std::env::remove_var("TEST_BOT_TOKEN");
	}

	#[test]
	fn test_env_var_with_default() {
		std::env::remove_var("TEST_MISSING_LEDGER_CRED");

		let resolved =
			resolve_env_vars("credential = \"${TEST_MISSING_LEDGER_CRED:-fallback}\"").unwrap();
		assert_eq!(resolved, "credential = \"fallback\"");
	}

	#[test]
	fn test_missing_env_var_without_default_fails() {
		std::env::remove_var("TEST_ABSENT_VARIABLE");

		let result = resolve_env_vars("token = \"${TEST_ABSENT_VARIABLE}\"");
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_full_config_with_catalog_override() {
		let config: Config = r#"
[telegram]
token = "123:abc"
admin_chat_id = 777

[telegram.polling]
poll_timeout_secs = 10
idle_pause_ms = 250
error_pause_secs = 2

[storage]
backend = "memory"

[ledger]
url = "https://rows.example/api"
credential = "secret"

[shop]
name = "CornerShop"
free_delivery_threshold = 30
delivery_fee = 3

[[catalog.categories]]
name = "Pantry"

[[catalog.categories.items]]
name = "Rice"
price = 2.50
unit = "kg"
"#
		.parse()
		.unwrap();

		assert_eq!(config.telegram.admin_chat_id, Some(777));
		assert_eq!(config.telegram.polling.poll_timeout_secs, 10);
		assert_eq!(config.ledger.as_ref().unwrap().url, "https://rows.example/api");
		assert_eq!(config.shop.name, "CornerShop");
		assert_eq!(
			config.shop.pricing_rule().free_delivery_threshold,
			Decimal::new(30, 0)
		);

		let catalog = config.catalog();
		let rice = catalog.find_item("Rice").unwrap();
		assert_eq!(rice.price, Decimal::new(250, 2));
		assert_eq!(rice.unit, "kg");
	}

	#[test]
	fn test_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("bot.toml");
		std::fs::write(&path, MINIMAL).unwrap();

		let config = Config::from_file(&path).unwrap();
		assert_eq!(config.telegram.token, "123:abc");
	}
}
