//! Protocol constants shared by the client and the on-chain verifiers.
//!
//! Values in this module are part of the wire format: signer and verifier
//! must agree on them bit for bit.

use crate::IntentVersion;
use alloy_primitives::{address, b256, Address, B256};

/// `orderDataType` tag of same-chain orders (`keccak256("SameChainOrder")`).
///
/// Same-chain orders include the nonce in their hash.
pub const SAME_CHAIN_ORDER_DATA_TYPE: B256 =
	b256!("bdf58e44a925664a3b0db1531eb18b5fc62ea206156ef6b3321f9fc39282f7ec");

/// `orderDataType` tag of cross-chain orders (`keccak256("CrossChainOrder")`).
pub const CROSS_CHAIN_ORDER_DATA_TYPE: B256 =
	b256!("db3c5ffa7ee197b62a1a4527372a01f66e13f40e607ffaa3624790d110ce1168");

/// Marker telling the account that a signature is chain agnostic
/// (`keccak256("kernel.replayable.signature")`).
pub const MAGIC_VALUE_SIG_REPLAYABLE: B256 =
	b256!("0555ad2729e8da1777a4e5020806f8bf7601c3db6bfe402f410a34958363a95a");

/// Suffix of ERC-6492 signatures issued by counterfactual accounts.
pub const ERC6492_MAGIC_SUFFIX: B256 =
	b256!("6492649264926492649264926492649264926492649264926492649264926492");

/// Signature prefix selecting the account's root validator.
pub const VALIDATOR_TYPE_ROOT: u8 = 0x00;

/// Chain id the intent service uses for Solana.
pub const SOLANA_CHAIN_ID: u64 = 792_703_809;

/// Kernel version whose EIP-712 domain wraps replayable signatures by default.
pub const DEFAULT_KERNEL_VERSION: &str = "0.3.2";

/// Default absolute timeout of receipt waiters, in milliseconds.
pub const DEFAULT_RECEIPT_TIMEOUT_MS: u64 = 120_000;

/// Default polling interval of receipt waiters, in milliseconds.
pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 4_000;

/// Upper bound applied to the polling interval of fill receipts.
pub const MAX_FILL_POLLING_INTERVAL_MS: u64 = 1_000;

/// Hosted intent-quote service.
pub const INTENT_SERVICE_URL: &str = "https://user-intent-service.onrender.com/intent";

/// Hosted relayer for mainnet chains.
pub const RELAYER_SERVICE_URL_MAINNET: &str = "https://relayer-d6ne.onrender.com";

/// Hosted relayer for testnet chains.
pub const RELAYER_SERVICE_URL_TESTNET: &str = "https://relayer-testnet.onrender.com";

/// Intent executor module deployed for a protocol version, if known.
///
/// Versions without a built-in address must be configured explicitly.
pub fn default_executor_address(version: IntentVersion) -> Option<Address> {
	match version {
		IntentVersion::V0_0_2 => Some(address!("04Eb0aDE11ec34cd4F41f9Ed516ada5c2eBffad2")),
		IntentVersion::V0_0_3 => Some(address!("3E1bF561DEbE46C22cc1e85EC8283A5EB49f5dae")),
		IntentVersion::V0_0_4 => None,
	}
}
