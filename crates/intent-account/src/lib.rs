//! Account management module for the intent client.
//!
//! This module provides the abstraction over the smart account that owns the
//! intents: its address, the validator module it signs through, replayable
//! (chain-agnostic) message signing, raw signing of batch roots, and the
//! encoding of calls into account call data.

use async_trait::async_trait;
use intent_types::{Address, Bytes, Call, B256};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

pub use implementations::local::{LocalAccountConfig, LocalKernelAccount};

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when calls cannot be encoded for the account.
	#[error("Encoding failed: {0}")]
	Encoding(String),
	/// Error that occurs when interacting with the account implementation.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the interface for smart account implementations.
///
/// Signing methods are async because real implementations may reach a remote
/// signer; they are the only suspension points of the signing pipeline.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// Address of the smart account.
	fn address(&self) -> Address;

	/// Validator module the account signs through.
	///
	/// Compared against the configured multi-chain validator to decide whether
	/// batches of orders can share one signature.
	fn validator_address(&self) -> Address;

	/// Kernel version used in the account's EIP-712 domain.
	fn kernel_version(&self) -> &str;

	/// Account factory followed by its calldata, empty when unknown.
	fn init_data(&self) -> Bytes;

	/// Signs `message` with the account's raw signing primitive
	/// (EIP-191 personal message of the owner key, 65 bytes).
	async fn sign_message(&self, message: &[u8]) -> Result<Bytes, AccountError>;

	/// Signs `hash` so the signature is valid on every chain.
	///
	/// The result carries the validator and replay markers and, for accounts
	/// that are not deployed yet, an ERC-6492 wrapper.
	async fn sign_replayable_message(&self, hash: B256) -> Result<Bytes, AccountError>;

	/// Encodes `calls` as call data executed by the account.
	fn encode_calls(&self, calls: &[Call]) -> Result<Bytes, AccountError>;
}
