//! Wires an [`IntentClient`] from configuration.

use std::sync::Arc;

use intent_account::{AccountInterface, LocalAccountConfig, LocalKernelAccount};
use intent_config::{AccountConfig, Config};
use intent_core::{ClientSettings, IntentClient};
use intent_order::{OrderHasher, OrderSigner};
use intent_transport::{HttpTransport, TransportRouter};

/// Creates the signing account described by `config`.
pub fn create_account(
	config: &AccountConfig,
) -> Result<Arc<dyn AccountInterface>, Box<dyn std::error::Error>> {
	let account = LocalKernelAccount::new(LocalAccountConfig {
		private_key: config.private_key.clone(),
		address: config.address,
		validator: config.validator,
		kernel_version: config.kernel_version.clone(),
		factory: config.factory,
		factory_data: config.factory_data.clone(),
		deployed: config.deployed,
	})?;

	tracing::info!(
		account = %account.address(),
		owner = %account.owner(),
		"Loaded account"
	);
	Ok(Arc::new(account))
}

/// Creates the order hasher, honoring a configured same-chain tag.
pub fn create_hasher(config: &Config) -> OrderHasher {
	config
		.order
		.same_chain_order_data_type
		.map(OrderHasher::new)
		.unwrap_or_default()
}

/// Creates the transport router over the configured peers.
pub fn create_router(config: &Config) -> Result<TransportRouter, Box<dyn std::error::Error>> {
	let transports = &config.transports;
	let project_id = config.client.project_id.as_deref();
	let timeout = transports.timeout();

	let intent_url = transports.intent_url(project_id);
	let relayer_url = transports.relayer_url(project_id, config.client.testnet);
	tracing::debug!(
		bundler = %transports.bundler,
		intent = %intent_url,
		relayer = %relayer_url,
		"Configured transports"
	);

	Ok(TransportRouter::new(
		Arc::new(HttpTransport::new(transports.bundler.clone(), timeout)?),
		Arc::new(HttpTransport::new(intent_url, timeout)?),
		Arc::new(HttpTransport::new(relayer_url, timeout)?),
	))
}

/// Builds the client: transports, account, signing policy and settings.
pub fn build_client(config: &Config) -> Result<IntentClient, Box<dyn std::error::Error>> {
	let router = create_router(config)?;

	let account = config.account.as_ref().map(create_account).transpose()?;
	let signer = OrderSigner::new(
		account,
		config.signing.multi_chain_validator,
		create_hasher(config),
	);
	tracing::info!(policy = ?signer.policy(), "Configured order signing");

	let settings = ClientSettings {
		version: config.client.version,
		polling_interval: config.polling_interval(),
		executors: config.executors()?,
		solana_address: config.client.solana_address.clone(),
	};

	Ok(IntentClient::new(Arc::new(router), signer, settings))
}

#[cfg(test)]
mod tests {
	use super::*;
	use intent_order::SigningPolicy;
	use intent_transport::Peer;
	use intent_types::{IntentVersion, B256};

	const CONFIG: &str = r#"
[client]
version = "0.0.3"
polling_interval_ms = 1500

[transports]
bundler = "http://localhost:4337"
relayer = "http://localhost:8080"

[account]
private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
validator = "0x845ADb2C711129d4f3966735eD98a9F09fC4cE57"

[signing]
multi_chain_validator = "0x845ADb2C711129d4f3966735eD98a9F09fC4cE57"
"#;

	#[test]
	fn test_build_client_from_config() {
		let config: Config = CONFIG.parse().unwrap();
		let client = build_client(&config).unwrap();

		assert_eq!(client.settings().version, IntentVersion::V0_0_3);
		assert_eq!(client.settings().polling_interval.as_millis(), 1500);
		assert_eq!(client.signer().policy(), SigningPolicy::MerkleAggregated);

		// no explicit address: the owner key's address
		let account = client.account().unwrap();
		assert_eq!(
			account.address().to_string(),
			"0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
		);
	}

	#[test]
	fn test_build_client_without_account() {
		let config: Config = CONFIG
			.split("[account]")
			.next()
			.unwrap()
			.parse()
			.unwrap();
		let client = build_client(&config).unwrap();

		assert!(client.account().is_none());
		assert_eq!(client.signer().policy(), SigningPolicy::PerOrder);
	}

	#[test]
	fn test_hasher_follows_config() {
		let config: Config = CONFIG.parse().unwrap();
		assert_eq!(
			create_hasher(&config).same_chain_tag(),
			OrderHasher::default().same_chain_tag()
		);

		let tag = B256::repeat_byte(0x01);
		let config: Config = format!("{CONFIG}\n[order]\nsame_chain_order_data_type = \"{tag}\"\n")
			.parse()
			.unwrap();
		assert_eq!(create_hasher(&config).same_chain_tag(), tag);
	}

	#[test]
	fn test_router_uses_default_routes() {
		let config: Config = CONFIG.parse().unwrap();
		let router = create_router(&config).unwrap();
		assert_eq!(router.resolve("rl_sendUserIntent"), Peer::Relayer);
		assert_eq!(router.resolve("ui_getCAB"), Peer::Intent);
		assert_eq!(router.resolve("eth_chainId"), Peer::Bundler);
	}
}
