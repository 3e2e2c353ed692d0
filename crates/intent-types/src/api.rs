//! Request and response types for the intent-quote and relayer services.
//!
//! Field names follow the camelCase JSON the remote services expect. Amounts
//! travel as hex quantities.

use crate::{GaslessCrossChainOrder, IntentVersion};
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// A single call executed by the smart account on the destination chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
	pub to: Address,
	#[serde(default)]
	pub value: U256,
	#[serde(default)]
	pub data: Bytes,
}

/// Token leg spent on a source chain.
///
/// When `amount` is omitted the intent service picks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputToken {
	pub address: Address,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<U256>,
	pub chain_id: u64,
}

/// Token leg received on the destination chain.
///
/// The address is kept as a string because non-EVM destinations (Solana)
/// use a different address format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputToken {
	pub address: String,
	pub amount: U256,
	pub chain_id: u64,
}

/// How the gas of the intent is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GasToken {
	Sponsored,
	Native,
	Usdc,
	Usdt,
}

/// Parameters of `ui_getIntent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIntentParameters {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sender: Option<Address>,
	/// Receiver of the output tokens; a Solana address for Solana destinations.
	pub recipient: String,
	pub call_data: Bytes,
	pub input_tokens: Vec<InputToken>,
	pub output_tokens: Vec<OutputToken>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_token: Option<GasToken>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub chain_id: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub init_data: Option<Bytes>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<IntentVersion>,
}

/// Unsigned orders quoted by the intent service.
///
/// Older services answer with a single `{order, fillerData}` object, newer
/// ones with `{orders: [...]}`. Both shapes deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "IntentQuoteWire")]
pub struct IntentQuote {
	pub orders: Vec<GaslessCrossChainOrder>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filler_data: Option<Bytes>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntentQuoteWire {
	#[serde(rename_all = "camelCase")]
	Batch {
		orders: Vec<GaslessCrossChainOrder>,
		#[serde(default)]
		filler_data: Option<Bytes>,
	},
	#[serde(rename_all = "camelCase")]
	Single {
		order: GaslessCrossChainOrder,
		#[serde(default)]
		filler_data: Option<Bytes>,
	},
}

impl From<IntentQuoteWire> for IntentQuote {
	fn from(wire: IntentQuoteWire) -> Self {
		match wire {
			IntentQuoteWire::Batch {
				orders,
				filler_data,
			} => IntentQuote {
				orders,
				filler_data,
			},
			IntentQuoteWire::Single { order, filler_data } => IntentQuote {
				orders: vec![order],
				filler_data,
			},
		}
	}
}

/// Parameters of `ui_estimateIntentFees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateIntentFeesParameters {
	pub recipient: String,
	pub call_data: Bytes,
	pub input_tokens: Vec<InputToken>,
	pub output_tokens: Vec<OutputToken>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_tokens: Option<GasToken>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub chain_id: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub init_data: Option<Bytes>,
	pub version: IntentVersion,
}

/// A token amount on a given chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
	pub address: Address,
	pub amount: U256,
	pub chain_id: u64,
}

/// Result of `ui_estimateIntentFees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateIntentFeesResult {
	pub input_payment_tokens: Vec<TokenAmount>,
	pub gas_payment_tokens: Vec<TokenAmount>,
}

/// Network family filter for consolidated balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
	Mainnet,
	Testnet,
}

/// Parameters of `ui_getCAB`.
///
/// `networks` and `network_type` are alternative filters; supplying both is
/// rejected by the client before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCabParameters {
	pub account_address: Address,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_tickers: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub networks: Option<Vec<u64>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub network_type: Option<NetworkType>,
}

/// Balance of one token on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBreakdown {
	pub chain_id: u64,
	pub address: Address,
	pub amount: U256,
}

/// Consolidated balance of a token across chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
	pub ticker: String,
	pub amount: U256,
	pub decimal: u8,
	pub breakdown: Vec<TokenBreakdown>,
}

/// Result of `ui_getCAB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCabResult {
	pub tokens: Vec<TokenBalance>,
}

/// Payload of `rl_sendUserIntent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendUserIntentRequest {
	pub order: GaslessCrossChainOrder,
	pub signature: Bytes,
	pub version: IntentVersion,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub solana_transaction: Option<String>,
}

/// Result of `rl_sendUserIntent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendUserIntentResult {
	pub ui_hash: B256,
}
