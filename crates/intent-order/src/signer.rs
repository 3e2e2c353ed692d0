//! Order signing with per-order or Merkle-aggregated signatures.
//!
//! Accounts signing through the multi-chain validator authorize a whole batch
//! with one signature over a Merkle root. Each output signature then carries
//! the root signature, the root and the inclusion proof of its own order, so
//! it verifies without the rest of the batch:
//!
//! `0x00 ‖ replayMagic ‖ rootSignature ‖ root ‖ abi.encode(bytes32[] proof)`
//!
//! Every other account signs each order hash separately.

use std::sync::Arc;

use alloy_primitives::{eip191_hash_message, Address, Bytes, B256};
use alloy_sol_types::SolValue;
use futures::future::try_join_all;
use intent_account::AccountInterface;
use intent_types::utils::{chain_agnostic_hash, MAGIC_VALUE_SIG_REPLAYABLE, VALIDATOR_TYPE_ROOT};
use intent_types::{truncate_id, GaslessCrossChainOrder, OrderHash};
use tracing::instrument;

use crate::erc6492::unwrap_erc6492;
use crate::merkle::MerkleTree;
use crate::{OrderHasher, SignerError};

/// How a batch of orders is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningPolicy {
	/// One replayable signature per order.
	PerOrder,
	/// One signature over the Merkle root of all orders.
	MerkleAggregated,
}

impl SigningPolicy {
	/// Policy of an account signing through `validator`.
	pub fn resolve(validator: Address, multi_chain_validator: Option<Address>) -> Self {
		match multi_chain_validator {
			Some(multi_chain) if multi_chain == validator => Self::MerkleAggregated,
			_ => Self::PerOrder,
		}
	}
}

/// Signs batches of orders on behalf of an account.
///
/// The policy is fixed when the signer is built.
#[derive(Clone)]
pub struct OrderSigner {
	account: Option<Arc<dyn AccountInterface>>,
	policy: SigningPolicy,
	hasher: OrderHasher,
}

impl std::fmt::Debug for OrderSigner {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("OrderSigner")
			.field("account", &self.account.as_ref().map(|a| a.address()))
			.field("policy", &self.policy)
			.field("hasher", &self.hasher)
			.finish()
	}
}

impl OrderSigner {
	/// Creates a signer for `account`.
	///
	/// Without an account every signing attempt fails with
	/// [`SignerError::AccountNotFound`].
	pub fn new(
		account: Option<Arc<dyn AccountInterface>>,
		multi_chain_validator: Option<Address>,
		hasher: OrderHasher,
	) -> Self {
		let policy = account
			.as_ref()
			.map(|account| SigningPolicy::resolve(account.validator_address(), multi_chain_validator))
			.unwrap_or(SigningPolicy::PerOrder);

		Self {
			account,
			policy,
			hasher,
		}
	}

	pub fn policy(&self) -> SigningPolicy {
		self.policy
	}

	pub fn hasher(&self) -> &OrderHasher {
		&self.hasher
	}

	pub fn account(&self) -> Option<&Arc<dyn AccountInterface>> {
		self.account.as_ref()
	}

	/// Signs `orders`, returning one signature per order in input order.
	///
	/// Any signing failure fails the whole batch.
	#[instrument(skip_all, fields(orders = orders.len(), policy = ?self.policy))]
	pub async fn sign(&self, orders: &[GaslessCrossChainOrder]) -> Result<Vec<Bytes>, SignerError> {
		let account = self.account.as_ref().ok_or(SignerError::AccountNotFound)?;
		if orders.is_empty() {
			return Err(SignerError::EmptyOrderSet);
		}

		let hashes: Vec<OrderHash> = orders.iter().map(|order| self.hasher.hash(order)).collect();

		let signatures = match self.policy {
			SigningPolicy::PerOrder => sign_each(account.as_ref(), &hashes).await?,
			SigningPolicy::MerkleAggregated => sign_aggregated(account.as_ref(), &hashes).await?,
		};

		tracing::info!(
			account = %account.address(),
			first_order = %truncate_id(&hashes[0].to_string()),
			"Signed order batch"
		);

		Ok(signatures)
	}
}

async fn sign_each(
	account: &dyn AccountInterface,
	hashes: &[OrderHash],
) -> Result<Vec<Bytes>, SignerError> {
	try_join_all(hashes.iter().map(|hash| async move {
		let signature = account.sign_replayable_message(*hash).await?;
		unwrap_erc6492(signature)
	}))
	.await
}

async fn sign_aggregated(
	account: &dyn AccountInterface,
	hashes: &[OrderHash],
) -> Result<Vec<Bytes>, SignerError> {
	let leaves: Vec<B256> = hashes
		.iter()
		.map(|hash| merkle_leaf(hash, &account.address(), account.kernel_version()))
		.collect();

	let tree = MerkleTree::from_leaves(leaves)?;
	let root = tree.root();
	let root_signature = account.sign_message(root.as_slice()).await?;

	tracing::debug!(
		root = %truncate_id(&root.to_string()),
		leaves = tree.len(),
		"Signed merkle root"
	);

	(0..tree.len())
		.map(|index| {
			let proof = tree.proof(index)?;
			let encoded_proof = proof.abi_encode();

			let mut signature =
				Vec::with_capacity(1 + 32 + root_signature.len() + 32 + encoded_proof.len());
			signature.push(VALIDATOR_TYPE_ROOT);
			signature.extend_from_slice(MAGIC_VALUE_SIG_REPLAYABLE.as_slice());
			signature.extend_from_slice(&root_signature);
			signature.extend_from_slice(root.as_slice());
			signature.extend_from_slice(&encoded_proof);
			unwrap_erc6492(signature.into())
		})
		.collect()
}

/// Leaf committed for an order: the account's chain-agnostic wrap of the
/// order hash as a personal message.
pub fn merkle_leaf(hash: &OrderHash, account: &Address, kernel_version: &str) -> B256 {
	chain_agnostic_hash(&eip191_hash_message(hash), account, kernel_version)
}
