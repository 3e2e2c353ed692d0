//! Consolidated balances: `ui_getCAB`.

use intent_transport::call;
use intent_types::{GetCabParameters, GetCabResult};

use crate::{IntentClient, IntentError};

impl IntentClient {
	/// Balances of `parameters.account_address` across the supported chains.
	pub async fn get_cab(&self, parameters: &GetCabParameters) -> Result<GetCabResult, IntentError> {
		if parameters.networks.is_some() && parameters.network_type.is_some() {
			return Err(IntentError::Configuration(
				"Provide either networks or network_type, not both".to_string(),
			));
		}

		Ok(call(self.transport.as_ref(), "ui_getCAB", [parameters]).await?)
	}
}
