//! Order processing module for the intent client.
//!
//! This module turns quoted orders into signed orders: it computes the
//! canonical order hash, batches order hashes under a Merkle root when the
//! account supports multi-chain signatures, and strips ERC-6492 deploy
//! wrappers from the resulting signatures.

use intent_account::AccountError;
use thiserror::Error;

pub mod erc6492;
pub mod hasher;
pub mod merkle;
pub mod signer;

pub use hasher::{order_hash, OrderHasher};
pub use merkle::{MerkleError, MerkleTree};
pub use signer::{merkle_leaf, OrderSigner, SigningPolicy};

/// Errors that can occur while signing orders.
#[derive(Debug, Error)]
pub enum SignerError {
	/// No account is connected to sign with.
	#[error("Account not found")]
	AccountNotFound,
	/// The batch contained no orders.
	#[error("No orders to sign")]
	EmptyOrderSet,
	/// The account rejected a signing request.
	#[error(transparent)]
	Account(#[from] AccountError),
	/// The batch could not be arranged in a Merkle tree.
	#[error("Merkle error: {0}")]
	Merkle(#[from] MerkleError),
	/// A signature could not be decoded.
	#[error("Malformed signature: {0}")]
	MalformedSignature(String),
}
