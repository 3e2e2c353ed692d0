//! Relayer status and receipt getters.

use alloy_primitives::B256;
use intent_transport::call;
use intent_types::{IntentReceipt, ReceiptKind, UserIntentStatusResult};

use crate::{IntentClient, IntentError};

impl IntentClient {
	/// Where the relayer is with the intent `ui_hash`.
	pub async fn get_user_intent_status(
		&self,
		ui_hash: B256,
	) -> Result<UserIntentStatusResult, IntentError> {
		let executor = self.executor_address()?;
		Ok(call(self.transport.as_ref(), "rl_getUserIntentStatus", (ui_hash, executor)).await?)
	}

	/// Receipt of the origin-chain open of `ui_hash`, if it happened.
	pub async fn get_user_intent_open_receipt(
		&self,
		ui_hash: B256,
	) -> Result<Option<IntentReceipt>, IntentError> {
		self.get_receipt(ReceiptKind::Open, ui_hash).await
	}

	/// Receipt of the destination-chain execution of `ui_hash`, if it happened.
	pub async fn get_user_intent_execution_receipt(
		&self,
		ui_hash: B256,
	) -> Result<Option<IntentReceipt>, IntentError> {
		self.get_receipt(ReceiptKind::Execution, ui_hash).await
	}

	/// Receipt of the destination-chain fill of `ui_hash`, if it happened.
	pub async fn get_user_intent_fill_receipt(
		&self,
		ui_hash: B256,
	) -> Result<Option<IntentReceipt>, IntentError> {
		self.get_receipt(ReceiptKind::Fill, ui_hash).await
	}

	async fn get_receipt(
		&self,
		kind: ReceiptKind,
		ui_hash: B256,
	) -> Result<Option<IntentReceipt>, IntentError> {
		let executor = self.executor_address()?;
		Ok(call(self.transport.as_ref(), kind.rpc_method(), (ui_hash, executor)).await?)
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::client::tests::{client_with, ScriptedTransport};
	use alloy_primitives::Address;
	use intent_types::utils::default_executor_address;
	use intent_types::{IntentVersion, UserIntentStatus};
	use serde_json::{json, Value};
	use std::sync::Arc;

	pub fn receipt_json(hash: B256) -> Value {
		json!({
			"intentHash": hash,
			"sender": "0x2222222222222222222222222222222222222222",
			"relayer": "0x3333333333333333333333333333333333333333",
			"executionChainId": "0x2105",
			"openChainId": "0xa",
			"logs": [],
			"receipt": { "status": "0x1", "blockNumber": "0x10" }
		})
	}

	#[tokio::test]
	async fn test_status_params_carry_executor() {
		let transport = Arc::new(ScriptedTransport::default());
		transport.respond(
			"rl_getUserIntentStatus",
			Ok(json!({
				"status": "OPENED",
				"openTransaction": { "chainId": 10, "txHash": B256::repeat_byte(0x0a) }
			})),
		);
		let client = client_with(transport.clone(), None);
		let hash = B256::repeat_byte(0x42);

		let status = client.get_user_intent_status(hash).await.unwrap();
		assert_eq!(status.status, UserIntentStatus::Opened);
		assert_eq!(status.open_transaction.unwrap().chain_id, 10);

		let params = &transport.params("rl_getUserIntentStatus")[0];
		let (sent_hash, executor): (B256, Address) = serde_json::from_value(params.clone()).unwrap();
		assert_eq!(sent_hash, hash);
		assert_eq!(executor, default_executor_address(IntentVersion::V0_0_3).unwrap());
	}

	#[tokio::test]
	async fn test_missing_receipt_is_none() {
		let transport = Arc::new(ScriptedTransport::default());
		transport.respond("rl_getUserIntentFillReceipt", Ok(Value::Null));
		let client = client_with(transport.clone(), None);

		let receipt = client.get_user_intent_fill_receipt(B256::ZERO).await.unwrap();
		assert!(receipt.is_none());
	}

	#[tokio::test]
	async fn test_receipt_getters_use_their_method() {
		let transport = Arc::new(ScriptedTransport::default());
		let hash = B256::repeat_byte(0x07);
		transport.respond("rl_getUserIntentOpenReceipt", Ok(receipt_json(hash)));
		transport.respond("rl_getUserIntentExecutionReceipt", Ok(receipt_json(hash)));
		let client = client_with(transport.clone(), None);

		let open = client.get_user_intent_open_receipt(hash).await.unwrap().unwrap();
		assert_eq!(open.intent_hash, hash);
		let execution = client.get_user_intent_execution_receipt(hash).await.unwrap();
		assert!(execution.is_some());

		assert_eq!(transport.count("rl_getUserIntentOpenReceipt"), 1);
		assert_eq!(transport.count("rl_getUserIntentExecutionReceipt"), 1);
		assert_eq!(transport.count("rl_getUserIntentFillReceipt"), 0);
	}
}
