//! Status and receipt types reported by the relayer for a submitted intent.

use alloy_primitives::{Address, B256, U256};
use alloy_rpc_types::Log;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a user intent as tracked by the relayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserIntentStatus {
	NotFound,
	Pending,
	Opened,
	Executed,
}

/// Reference to a transaction on a specific chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTransaction {
	pub chain_id: u64,
	pub tx_hash: B256,
}

/// Result of `rl_getUserIntentStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIntentStatusResult {
	pub status: UserIntentStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub open_transaction: Option<ChainTransaction>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub execution_transaction: Option<ChainTransaction>,
}

/// Which settlement step a receipt describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
	/// The order was opened on the origin chain.
	Open,
	/// The order's calls were executed on the destination chain.
	Execution,
	/// The order was filled on the destination chain.
	Fill,
}

impl ReceiptKind {
	/// Relayer method that returns this kind of receipt.
	pub fn rpc_method(&self) -> &'static str {
		match self {
			ReceiptKind::Open => "rl_getUserIntentOpenReceipt",
			ReceiptKind::Execution => "rl_getUserIntentExecutionReceipt",
			ReceiptKind::Fill => "rl_getUserIntentFillReceipt",
		}
	}

	/// Operation name used to key receipt observers.
	pub fn wait_operation(&self) -> &'static str {
		match self {
			ReceiptKind::Open => "waitForUserIntentOpenReceipt",
			ReceiptKind::Execution => "waitForUserIntentExecutionReceipt",
			ReceiptKind::Fill => "waitForUserIntentFillReceipt",
		}
	}
}

impl fmt::Display for ReceiptKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ReceiptKind::Open => write!(f, "open"),
			ReceiptKind::Execution => write!(f, "execution"),
			ReceiptKind::Fill => write!(f, "fill"),
		}
	}
}

/// Receipt of a settled intent step.
///
/// The relayer returns `null` until the step has happened; callers see that
/// as `None`. `receipt` is the chain transaction receipt, forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentReceipt {
	pub intent_hash: B256,
	pub sender: Address,
	pub relayer: Address,
	pub execution_chain_id: U256,
	/// Present on open and execution receipts.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub open_chain_id: Option<U256>,
	#[serde(default)]
	pub logs: Vec<Log>,
	pub receipt: serde_json::Value,
}
