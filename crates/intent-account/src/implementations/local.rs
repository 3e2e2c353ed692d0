//! Local Kernel account backed by an in-memory owner key.
//!
//! The owner key signs through the account's ECDSA validator. Replayable
//! signatures wrap the message in the Kernel EIP-712 domain with chain id 0
//! and are prefixed with the root-validator and replay markers.

use crate::{AccountError, AccountInterface};
use alloy_primitives::{eip191_hash_message, Address, Bytes, B256, U256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{sol, SolCall, SolValue};
use async_trait::async_trait;
use intent_types::utils::{
	chain_agnostic_hash, DEFAULT_KERNEL_VERSION, ERC6492_MAGIC_SUFFIX, MAGIC_VALUE_SIG_REPLAYABLE,
	VALIDATOR_TYPE_ROOT,
};
use intent_types::{truncate_id, Call, SecretString};

sol! {
	/// ERC-7579 execution entry of a batched call.
	struct Execution {
		address target;
		uint256 value;
		bytes callData;
	}

	/// Kernel v3 entry point for account-initiated calls.
	function execute(bytes32 mode, bytes executionCalldata);
}

/// ERC-7579 call type byte of a batched execution.
const CALL_TYPE_BATCH: u8 = 0x01;

/// Settings of a local Kernel account.
#[derive(Debug, Clone)]
pub struct LocalAccountConfig {
	/// Hex encoded owner key.
	pub private_key: SecretString,
	/// Smart account address; the owner address when omitted.
	pub address: Option<Address>,
	/// Root validator module of the account.
	pub validator: Address,
	/// Kernel version of the account's EIP-712 domain.
	pub kernel_version: Option<String>,
	/// Factory deploying the account.
	pub factory: Option<Address>,
	/// Calldata passed to the factory.
	pub factory_data: Bytes,
	/// Whether the account is already deployed.
	pub deployed: bool,
}

/// Kernel smart account whose owner key lives in memory.
#[derive(Debug)]
pub struct LocalKernelAccount {
	signer: PrivateKeySigner,
	address: Address,
	validator: Address,
	kernel_version: String,
	factory: Option<Address>,
	factory_data: Bytes,
	deployed: bool,
}

impl LocalKernelAccount {
	/// Creates the account from its settings.
	pub fn new(config: LocalAccountConfig) -> Result<Self, AccountError> {
		let signer = config
			.private_key
			.with_exposed(|key| key.parse::<PrivateKeySigner>())
			.map_err(|e| AccountError::InvalidKey(e.to_string()))?;

		let address = config.address.unwrap_or_else(|| signer.address());

		Ok(Self {
			signer,
			address,
			validator: config.validator,
			kernel_version: config
				.kernel_version
				.unwrap_or_else(|| DEFAULT_KERNEL_VERSION.to_string()),
			factory: config.factory,
			factory_data: config.factory_data,
			deployed: config.deployed,
		})
	}

	/// Address of the owner key.
	pub fn owner(&self) -> Address {
		self.signer.address()
	}

	/// Wraps `signature` for verification before the account is deployed.
	fn wrap_erc6492(&self, signature: Bytes) -> Bytes {
		let Some(factory) = self.factory.filter(|_| !self.deployed) else {
			return signature;
		};

		let mut out = (factory, self.factory_data.clone(), signature).abi_encode_params();
		out.extend_from_slice(ERC6492_MAGIC_SUFFIX.as_slice());
		out.into()
	}
}

#[async_trait]
impl AccountInterface for LocalKernelAccount {
	fn address(&self) -> Address {
		self.address
	}

	fn validator_address(&self) -> Address {
		self.validator
	}

	fn kernel_version(&self) -> &str {
		&self.kernel_version
	}

	fn init_data(&self) -> Bytes {
		match self.factory {
			Some(factory) => [factory.as_slice(), &self.factory_data[..]].concat().into(),
			None => Bytes::new(),
		}
	}

	async fn sign_message(&self, message: &[u8]) -> Result<Bytes, AccountError> {
		let signature = self
			.signer
			.sign_message(message)
			.await
			.map_err(|e| AccountError::SigningFailed(e.to_string()))?;
		Ok(Bytes::copy_from_slice(&signature.as_bytes()))
	}

	async fn sign_replayable_message(&self, hash: B256) -> Result<Bytes, AccountError> {
		let message_hash = eip191_hash_message(hash);
		let digest = chain_agnostic_hash(&message_hash, &self.address, &self.kernel_version);
		let signature = self.sign_message(digest.as_slice()).await?;

		tracing::debug!(
			hash = %truncate_id(&hash.to_string()),
			account = %self.address,
			deployed = self.deployed,
			"Signed replayable message"
		);

		let mut out = Vec::with_capacity(1 + 32 + signature.len());
		out.push(VALIDATOR_TYPE_ROOT);
		out.extend_from_slice(MAGIC_VALUE_SIG_REPLAYABLE.as_slice());
		out.extend_from_slice(&signature);
		Ok(self.wrap_erc6492(out.into()))
	}

	fn encode_calls(&self, calls: &[Call]) -> Result<Bytes, AccountError> {
		let (mode, execution_calldata) = match calls {
			[] => return Err(AccountError::Encoding("no calls to encode".to_string())),
			[call] => (B256::ZERO, pack_single(call)),
			_ => {
				let executions: Vec<Execution> = calls
					.iter()
					.map(|call| Execution {
						target: call.to,
						value: call.value,
						callData: call.data.clone(),
					})
					.collect();
				let mut mode = B256::ZERO;
				mode.0[0] = CALL_TYPE_BATCH;
				(mode, executions.abi_encode())
			},
		};

		Ok(executeCall {
			mode,
			executionCalldata: execution_calldata.into(),
		}
		.abi_encode()
		.into())
	}
}

/// ERC-7579 single execution: `target ‖ value ‖ callData`, tightly packed.
fn pack_single(call: &Call) -> Vec<u8> {
	let mut packed = Vec::with_capacity(20 + 32 + call.data.len());
	packed.extend_from_slice(call.to.as_slice());
	packed.extend_from_slice(&call.value.to_be_bytes::<32>());
	packed.extend_from_slice(&call.data);
	packed
}
