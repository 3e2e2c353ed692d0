//! The intent client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use intent_account::AccountInterface;
use intent_order::OrderSigner;
use intent_transport::{Transport, TransportError};
use intent_types::utils::{default_executor_address, DEFAULT_POLLING_INTERVAL_MS};
use intent_types::{IntentReceipt, IntentVersion};
use serde_json::Value;
use uuid::Uuid;

use crate::observe::ObserverRegistry;
use crate::IntentError;

/// Client-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
	/// Intent protocol version submitted with every intent.
	pub version: IntentVersion,
	/// Default delay between two receipt polls.
	pub polling_interval: Duration,
	/// Intent executor contract per version.
	pub executors: HashMap<IntentVersion, Address>,
	/// Recipient used when an intent pays out on Solana.
	pub solana_address: Option<String>,
}

impl ClientSettings {
	/// Settings for `version` with the known executor addresses.
	pub fn new(version: IntentVersion) -> Self {
		let executors = IntentVersion::ALL
			.into_iter()
			.filter_map(|version| default_executor_address(version).map(|address| (version, address)))
			.collect();

		Self {
			version,
			polling_interval: Duration::from_millis(DEFAULT_POLLING_INTERVAL_MS),
			executors,
			solana_address: None,
		}
	}

	pub fn with_polling_interval(mut self, interval: Duration) -> Self {
		self.polling_interval = interval;
		self
	}

	pub fn with_executor(mut self, version: IntentVersion, executor: Address) -> Self {
		self.executors.insert(version, executor);
		self
	}

	pub fn with_solana_address(mut self, address: impl Into<String>) -> Self {
		self.solana_address = Some(address.into());
		self
	}
}

/// Client that quotes, signs, submits and tracks intents.
///
/// Cloning is cheap and clones share their receipt observers.
#[derive(Clone)]
pub struct IntentClient {
	pub(crate) uid: String,
	pub(crate) transport: Arc<dyn Transport>,
	pub(crate) signer: Arc<OrderSigner>,
	pub(crate) settings: ClientSettings,
	pub(crate) receipts: ObserverRegistry<IntentReceipt>,
}

impl std::fmt::Debug for IntentClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IntentClient")
			.field("uid", &self.uid)
			.field("signer", &self.signer)
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}

impl IntentClient {
	/// Creates a client sending every call through `transport`.
	///
	/// `transport` is normally a [`intent_transport::TransportRouter`] so
	/// quote and relayer calls reach their services.
	pub fn new(transport: Arc<dyn Transport>, signer: OrderSigner, settings: ClientSettings) -> Self {
		Self {
			uid: Uuid::new_v4().to_string(),
			transport,
			signer: Arc::new(signer),
			settings,
			receipts: ObserverRegistry::new(),
		}
	}

	/// Identifier separating this client's receipt observers from other
	/// clients'.
	pub fn uid(&self) -> &str {
		&self.uid
	}

	pub fn settings(&self) -> &ClientSettings {
		&self.settings
	}

	pub fn signer(&self) -> &OrderSigner {
		&self.signer
	}

	pub fn account(&self) -> Option<&Arc<dyn AccountInterface>> {
		self.signer.account()
	}

	pub(crate) fn require_account(&self) -> Result<&Arc<dyn AccountInterface>, IntentError> {
		self.account().ok_or(IntentError::AccountNotFound)
	}

	/// Executor contract of the configured intent version.
	pub fn executor_address(&self) -> Result<Address, IntentError> {
		self.settings
			.executors
			.get(&self.settings.version)
			.copied()
			.ok_or_else(|| {
				IntentError::Configuration(format!(
					"No intent executor address known for version {}",
					self.settings.version
				))
			})
	}

	/// Sends a raw JSON-RPC call through the client's transport.
	pub async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
		self.transport.request(method, params).await
	}
}
