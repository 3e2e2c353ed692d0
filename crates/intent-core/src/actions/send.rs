//! Submission: signing quoted orders and `rl_sendUserIntent`.

use intent_transport::call;
use intent_types::{truncate_id, IntentQuote, SendUserIntentRequest, SendUserIntentResult};
use tracing::instrument;

use super::intent::PrepareUserIntentParameters;
use crate::{IntentClient, IntentError};

/// What to submit: an existing quote, or the parameters to obtain one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendUserIntentParameters {
	/// Quote to sign and submit. When absent, `prepare` is quoted first.
	pub intent: Option<IntentQuote>,
	pub prepare: PrepareUserIntentParameters,
	/// Serialized Solana transaction forwarded to the relayer as-is.
	pub solana_transaction: Option<String>,
}

impl From<IntentQuote> for SendUserIntentParameters {
	fn from(intent: IntentQuote) -> Self {
		Self {
			intent: Some(intent),
			..Default::default()
		}
	}
}

impl From<PrepareUserIntentParameters> for SendUserIntentParameters {
	fn from(prepare: PrepareUserIntentParameters) -> Self {
		Self {
			prepare,
			..Default::default()
		}
	}
}

impl IntentClient {
	/// Signs every order of the quote and submits them to the relayer, one
	/// request per order, in quote order.
	///
	/// Signing completes for the whole batch before anything is sent; a
	/// submission failure stops the remaining submissions.
	#[instrument(skip_all, fields(version = %self.settings.version))]
	pub async fn send_user_intent(
		&self,
		parameters: &SendUserIntentParameters,
	) -> Result<Vec<SendUserIntentResult>, IntentError> {
		self.require_account()?;

		let quote = match &parameters.intent {
			Some(quote) => quote.clone(),
			None => self.prepare_user_intent(&parameters.prepare).await?,
		};

		let signatures = self.signer.sign(&quote.orders).await?;

		let mut results = Vec::with_capacity(quote.orders.len());
		for (order, signature) in quote.orders.into_iter().zip(signatures) {
			let request = SendUserIntentRequest {
				order,
				signature,
				version: self.settings.version,
				solana_transaction: parameters.solana_transaction.clone(),
			};
			let result: SendUserIntentResult =
				call(self.transport.as_ref(), "rl_sendUserIntent", [request]).await?;

			tracing::info!(ui_hash = %truncate_id(&result.ui_hash.to_string()), "Submitted user intent");
			results.push(result);
		}

		Ok(results)
	}
}
