//! Configuration module for the intent client.
//!
//! This module provides the structures of the client's TOML configuration:
//! which intent version to speak, where the bundler, intent service and
//! relayer live, which account signs, and how orders are hashed and signed.
//! Values of the form `${VAR}` or `${VAR:-default}` are resolved from the
//! environment before parsing, and the result is validated.

use alloy_primitives::{Address, Bytes, B256};
use intent_types::utils::{
	default_executor_address, DEFAULT_POLLING_INTERVAL_MS, INTENT_SERVICE_URL,
	RELAYER_SERVICE_URL_MAINNET, RELAYER_SERVICE_URL_TESTNET,
};
use intent_types::{IntentVersion, SecretString};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
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
		// Keep the message only, not the dump of the input
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the intent client.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Client-wide settings.
	pub client: ClientConfig,
	/// Endpoints of the remote peers.
	pub transports: TransportsConfig,
	/// Signing account. Actions that sign fail without one.
	pub account: Option<AccountConfig>,
	/// Signing policy settings.
	#[serde(default)]
	pub signing: SigningConfig,
	/// Per-version settings, keyed by version string (e.g. "0.0.3").
	#[serde(default)]
	pub versions: HashMap<String, VersionConfig>,
	/// Order hashing settings.
	#[serde(default)]
	pub order: OrderConfig,
}

/// Client-wide settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
	/// Intent protocol version.
	pub version: IntentVersion,
	/// Default delay between two receipt polls in milliseconds.
	/// Defaults to 4000 milliseconds if not specified.
	#[serde(default = "default_polling_interval_ms")]
	pub polling_interval_ms: u64,
	/// Project identifier appended to the hosted service URLs.
	pub project_id: Option<String>,
	/// Whether the hosted testnet relayer is used.
	#[serde(default)]
	pub testnet: bool,
	/// Recipient of intents paying out on Solana.
	pub solana_address: Option<String>,
}

fn default_polling_interval_ms() -> u64 {
	DEFAULT_POLLING_INTERVAL_MS
}

/// Endpoints of the bundler, the intent service and the relayer.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportsConfig {
	/// Bundler (execution node) URL.
	pub bundler: String,
	/// Intent service URL. Defaults to the hosted service.
	pub intent: Option<String>,
	/// Relayer URL. Defaults to the hosted relayer.
	pub relayer: Option<String>,
	/// Request timeout in seconds.
	/// Defaults to 30 seconds if not specified.
	#[serde(default = "default_timeout_seconds")]
	pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
	30
}

fn with_project(base: &str, project_id: Option<&str>) -> String {
	match project_id {
		Some(project_id) => format!("{base}/{project_id}"),
		None => base.to_string(),
	}
}

impl TransportsConfig {
	/// Intent service URL, falling back to the hosted service.
	pub fn intent_url(&self, project_id: Option<&str>) -> String {
		self.intent
			.clone()
			.unwrap_or_else(|| with_project(INTENT_SERVICE_URL, project_id))
	}

	/// Relayer URL, falling back to the hosted mainnet or testnet relayer.
	pub fn relayer_url(&self, project_id: Option<&str>, testnet: bool) -> String {
		self.relayer.clone().unwrap_or_else(|| {
			let base = if testnet {
				RELAYER_SERVICE_URL_TESTNET
			} else {
				RELAYER_SERVICE_URL_MAINNET
			};
			with_project(base, project_id)
		})
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_seconds)
	}
}

/// Settings of the signing account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
	/// Hex encoded owner key.
	pub private_key: SecretString,
	/// Smart account address. Defaults to the owner address.
	pub address: Option<Address>,
	/// Root validator module of the account.
	pub validator: Address,
	/// Kernel version of the account.
	pub kernel_version: Option<String>,
	/// Factory deploying the account.
	pub factory: Option<Address>,
	/// Calldata passed to the factory.
	#[serde(default)]
	pub factory_data: Bytes,
	/// Whether the account is already deployed.
	/// Defaults to true if not specified.
	#[serde(default = "default_deployed")]
	pub deployed: bool,
}

fn default_deployed() -> bool {
	true
}

/// Signing policy settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SigningConfig {
	/// Validator able to verify one signature over a batch of orders on
	/// several chains. Batches are signed per order when unset or when the
	/// account uses another validator.
	pub multi_chain_validator: Option<Address>,
}

/// Per-version settings.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionConfig {
	/// Intent executor contract of this version.
	pub executor: Address,
}

/// Order hashing settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderConfig {
	/// Tag marking same-chain orders, whose hash includes the nonce.
	pub same_chain_order_data_type: Option<B256>,
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)));
				},
			},
		};

		result.push_str(&input[last..full_match.start()]);
		result.push_str(&value);
		last = full_match.end();
	}
	result.push_str(&input[last..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving environment variables.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Executor contract per intent version: the known addresses, overridden
	/// or extended by the `[versions]` table.
	pub fn executors(&self) -> Result<HashMap<IntentVersion, Address>, ConfigError> {
		let mut executors: HashMap<IntentVersion, Address> = IntentVersion::ALL
			.into_iter()
			.filter_map(|version| default_executor_address(version).map(|address| (version, address)))
			.collect();

		for (name, version_config) in &self.versions {
			let version = IntentVersion::from_str(name)
				.map_err(|e| ConfigError::Validation(e.to_string()))?;
			executors.insert(version, version_config.executor);
		}

		Ok(executors)
	}

	pub fn polling_interval(&self) -> Duration {
		Duration::from_millis(self.client.polling_interval_ms)
	}

	/// Validates the configuration.
	///
	/// Checks that the bundler URL is set, intervals and timeouts are
	/// positive, version keys are known, the configured version has an
	/// executor, and the account key is a 32-byte hex string.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.transports.bundler.trim().is_empty() {
			return Err(ConfigError::Validation("Bundler URL cannot be empty".into()));
		}
		for (name, url) in [("intent", &self.transports.intent), ("relayer", &self.transports.relayer)] {
			if url.as_deref().is_some_and(|url| url.trim().is_empty()) {
				return Err(ConfigError::Validation(format!("{name} URL cannot be empty")));
			}
		}
		if self.transports.timeout_seconds == 0 {
			return Err(ConfigError::Validation(
				"Transport timeout_seconds must be greater than 0".into(),
			));
		}

		if self.client.polling_interval_ms == 0 {
			return Err(ConfigError::Validation(
				"polling_interval_ms must be greater than 0".into(),
			));
		}

		let executors = self.executors()?;
		if !executors.contains_key(&self.client.version) {
			return Err(ConfigError::Validation(format!(
				"No executor address for intent version {}; add [versions.\"{}\"]",
				self.client.version, self.client.version
			)));
		}

		if let Some(ref account) = self.account {
			if account.private_key.is_empty() {
				return Err(ConfigError::Validation("Account private_key cannot be empty".into()));
			}
			let valid_key = account
				.private_key
				.with_exposed(|key| B256::from_str(key.trim()).is_ok());
			if !valid_key {
				return Err(ConfigError::Validation(
					"Account private_key must be 32 bytes of hex".into(),
				));
			}
			if !account.factory_data.is_empty() && account.factory.is_none() {
				return Err(ConfigError::Validation(
					"Account factory_data requires a factory".into(),
				));
			}
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved first and the result is validated.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;
	use std::io::Write;

	const MINIMAL: &str = r#"
[client]
version = "0.0.3"

[transports]
bundler = "http://localhost:4337"
"#;

	const FULL: &str = r#"
[client]
version = "0.0.4"
polling_interval_ms = 2000
project_id = "proj-1"
testnet = true
solana_address = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"

[transports]
bundler = "http://localhost:4337"
timeout_seconds = 10

[account]
private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
validator = "0x845ADb2C711129d4f3966735eD98a9F09fC4cE57"
factory = "0xd703aaE79538628d27099B8c4f621bE4CCd142d5"
factory_data = "0xc0de"
deployed = false

[signing]
multi_chain_validator = "0x845ADb2C711129d4f3966735eD98a9F09fC4cE57"

[versions."0.0.4"]
executor = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"

[order]
same_chain_order_data_type = "0x0000000000000000000000000000000000000000000000000000000000000001"
"#;

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("INTENT_TEST_HOST", "localhost");
		std::env::set_var("INTENT_TEST_PORT", "4337");

		let input = "bundler = \"http://${INTENT_TEST_HOST}:${INTENT_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "bundler = \"http://localhost:4337\"");

		std::env::remove_var("INTENT_TEST_HOST");
		std::env::remove_var("INTENT_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${INTENT_MISSING_VAR:-fallback}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"fallback\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let result = resolve_env_vars("value = \"${INTENT_MISSING_VAR}\"");
		assert!(result.unwrap_err().to_string().contains("INTENT_MISSING_VAR"));
	}

	#[test]
	fn test_oversized_input_rejected() {
		let input = "#".repeat(1024 * 1024 + 1);
		assert!(matches!(resolve_env_vars(&input), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_minimal_config_defaults() {
		let config: Config = MINIMAL.parse().unwrap();
		assert_eq!(config.client.version, IntentVersion::V0_0_3);
		assert_eq!(config.polling_interval(), Duration::from_secs(4));
		assert_eq!(config.transports.timeout(), Duration::from_secs(30));
		assert!(config.account.is_none());
		assert!(config.signing.multi_chain_validator.is_none());
		assert!(config.order.same_chain_order_data_type.is_none());

		assert_eq!(config.transports.intent_url(None), INTENT_SERVICE_URL);
		assert_eq!(config.transports.relayer_url(None, false), RELAYER_SERVICE_URL_MAINNET);
	}

	#[test]
	fn test_full_config() {
		let config: Config = FULL.parse().unwrap();
		let account = config.account.as_ref().unwrap();
		assert!(!account.deployed);
		assert_eq!(account.factory_data, Bytes::from_static(&[0xc0, 0xde]));
		assert_eq!(
			config.signing.multi_chain_validator,
			Some(address!("845ADb2C711129d4f3966735eD98a9F09fC4cE57"))
		);
		assert_eq!(
			config.executors().unwrap()[&IntentVersion::V0_0_4],
			Address::repeat_byte(0xee)
		);
		assert_eq!(
			config.transports.relayer_url(config.client.project_id.as_deref(), config.client.testnet),
			format!("{RELAYER_SERVICE_URL_TESTNET}/proj-1")
		);
		assert_eq!(
			config.transports.intent_url(config.client.project_id.as_deref()),
			format!("{INTENT_SERVICE_URL}/proj-1")
		);
	}

	#[test]
	fn test_private_key_from_env() {
		std::env::set_var(
			"INTENT_TEST_PRIVATE_KEY",
			"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
		);
		let config_str = format!(
			"{MINIMAL}\n[account]\nprivate_key = \"${{INTENT_TEST_PRIVATE_KEY}}\"\nvalidator = \"0x845ADb2C711129d4f3966735eD98a9F09fC4cE57\"\n"
		);
		let config: Config = config_str.parse().unwrap();
		let account = config.account.unwrap();
		assert!(account.deployed);
		assert!(!format!("{account:?}").contains("ac0974"));
		std::env::remove_var("INTENT_TEST_PRIVATE_KEY");
	}

	#[test]
	fn test_validation_errors() {
		let cases = [
			MINIMAL.replace("http://localhost:4337", " "),
			MINIMAL.replace("[client]", "[client]\npolling_interval_ms = 0"),
			MINIMAL.replace("[transports]", "[transports]\ntimeout_seconds = 0"),
			MINIMAL.replace("0.0.3", "0.0.4"),
			format!("{MINIMAL}\n[versions.\"9.9.9\"]\nexecutor = \"0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee\"\n"),
			format!(
				"{MINIMAL}\n[account]\nprivate_key = \"0x1234\"\nvalidator = \"0x845ADb2C711129d4f3966735eD98a9F09fC4cE57\"\n"
			),
		];

		for case in cases {
			match case.parse::<Config>() {
				Err(ConfigError::Validation(_)) => {},
				other => panic!("expected validation error for:\n{case}\ngot {other:?}"),
			}
		}
	}

	#[test]
	fn test_unknown_version_is_parse_error() {
		let result = MINIMAL.replace("0.0.3", "1.0.0").parse::<Config>();
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[tokio::test]
	async fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(FULL.as_bytes()).unwrap();

		let config = Config::from_file(file.path()).await.unwrap();
		assert_eq!(config.client.version, IntentVersion::V0_0_4);
		assert_eq!(config.polling_interval(), Duration::from_secs(2));
	}

	#[tokio::test]
	async fn test_from_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let result = Config::from_file(dir.path().join("missing.toml")).await;
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}
}
