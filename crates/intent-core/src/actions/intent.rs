//! Quoting: `ui_getIntent` and `ui_estimateIntentFees`.

use alloy_primitives::Bytes;
use intent_account::AccountInterface;
use intent_transport::call;
use intent_types::utils::SOLANA_CHAIN_ID;
use intent_types::{
	Call, EstimateIntentFeesParameters, EstimateIntentFeesResult, GasToken, GetIntentParameters,
	InputToken, IntentQuote, OutputToken,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{IntentClient, IntentError};

/// What the user wants done, before it is turned into a quote request.
///
/// The work on the destination chain is given either as `calls`, encoded by
/// the account, or as ready `call_data`; never both. Without either the intent
/// only moves tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrepareUserIntentParameters {
	pub calls: Option<Vec<Call>>,
	pub call_data: Option<Bytes>,
	pub input_tokens: Vec<InputToken>,
	pub output_tokens: Vec<OutputToken>,
	pub gas_token: Option<GasToken>,
	/// Destination chain when no output token names one.
	pub chain_id: Option<u64>,
}

impl PrepareUserIntentParameters {
	fn call_data(&self, account: &dyn AccountInterface) -> Result<Bytes, IntentError> {
		match (&self.calls, &self.call_data) {
			(Some(_), Some(_)) => Err(IntentError::Configuration(
				"Provide either calls or call_data, not both".to_string(),
			)),
			(Some(calls), None) => Ok(account.encode_calls(calls)?),
			(None, Some(call_data)) => Ok(call_data.clone()),
			(None, None) => Ok(Bytes::new()),
		}
	}

	/// Chain the output tokens are delivered on.
	fn destination_chain_id(&self) -> Result<u64, IntentError> {
		self.output_tokens
			.first()
			.map(|token| token.chain_id)
			.or(self.chain_id)
			.ok_or_else(|| {
				IntentError::Configuration("Provide either output tokens or a chain id".to_string())
			})
	}
}

impl IntentClient {
	/// Asks the intent service to quote `parameters`.
	pub async fn get_intent(
		&self,
		parameters: &GetIntentParameters,
	) -> Result<IntentQuote, IntentError> {
		let quote: IntentQuote = call(self.transport.as_ref(), "ui_getIntent", [parameters]).await?;
		tracing::debug!(orders = quote.orders.len(), "Received intent quote");
		Ok(quote)
	}

	/// Builds the quote request for `parameters` on behalf of the connected
	/// account and asks the intent service to quote it.
	#[instrument(skip_all, fields(version = %self.settings.version))]
	pub async fn prepare_user_intent(
		&self,
		parameters: &PrepareUserIntentParameters,
	) -> Result<IntentQuote, IntentError> {
		let request = self.get_intent_parameters(parameters)?;
		self.get_intent(&request).await
	}

	pub(crate) fn get_intent_parameters(
		&self,
		parameters: &PrepareUserIntentParameters,
	) -> Result<GetIntentParameters, IntentError> {
		let account = self.require_account()?;
		let call_data = parameters.call_data(account.as_ref())?;
		let destination = parameters.destination_chain_id()?;

		let recipient = if destination == SOLANA_CHAIN_ID {
			self.settings.solana_address.clone().ok_or_else(|| {
				IntentError::Configuration(
					"A Solana address is required for Solana destinations".to_string(),
				)
			})?
		} else {
			account.address().to_string()
		};

		Ok(GetIntentParameters {
			sender: Some(account.address()),
			recipient,
			call_data,
			input_tokens: parameters.input_tokens.clone(),
			output_tokens: parameters.output_tokens.clone(),
			gas_token: parameters.gas_token,
			chain_id: parameters.chain_id,
			init_data: Some(account.init_data()),
			version: Some(self.settings.version),
		})
	}

	/// Estimates the input and gas payments `parameters` would cost.
	#[instrument(skip_all, fields(version = %self.settings.version))]
	pub async fn estimate_user_intent_fees(
		&self,
		parameters: &PrepareUserIntentParameters,
	) -> Result<EstimateIntentFeesResult, IntentError> {
		let account = self.require_account()?;
		let request = EstimateIntentFeesParameters {
			recipient: account.address().to_string(),
			call_data: parameters.call_data(account.as_ref())?,
			input_tokens: parameters.input_tokens.clone(),
			output_tokens: parameters.output_tokens.clone(),
			gas_tokens: parameters.gas_token,
			chain_id: parameters.chain_id,
			init_data: Some(account.init_data()),
			version: self.settings.version,
		};

		Ok(call(self.transport.as_ref(), "ui_estimateIntentFees", [request]).await?)
	}
}
