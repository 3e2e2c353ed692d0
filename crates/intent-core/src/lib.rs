//! Core client for cross-chain intents.
//!
//! This module ties the workspace together: the [`IntentClient`] quotes
//! orders through the intent service, signs them with the connected account,
//! submits them to the relayer and observes the receipts of the resulting
//! intents until they settle.

use intent_account::AccountError;
use intent_order::SignerError;
use intent_transport::TransportError;
use thiserror::Error;

pub mod actions;
pub mod client;
pub mod observe;

pub use actions::intent::PrepareUserIntentParameters;
pub use actions::send::SendUserIntentParameters;
pub use client::{ClientSettings, IntentClient};
pub use observe::{observer_key, ObserverRegistry, WaitError, WaitOptions};

/// Errors surfaced by the intent client.
#[derive(Debug, Error)]
pub enum IntentError {
	/// The action needs an account and none is connected.
	#[error("Account not found")]
	AccountNotFound,
	/// There were no orders to sign.
	#[error("No orders to sign")]
	EmptyOrderSet,
	/// The caller passed inputs that cannot be combined, or the client lacks
	/// a setting the action needs.
	#[error("Configuration error: {0}")]
	Configuration(String),
	/// Signing an order failed.
	#[error(transparent)]
	Signer(SignerError),
	/// The account rejected a request.
	#[error(transparent)]
	Account(#[from] AccountError),
	/// A remote peer rejected the call or could not be reached.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Waiting for a receipt failed.
	#[error(transparent)]
	Wait(#[from] WaitError),
}

impl From<SignerError> for IntentError {
	fn from(err: SignerError) -> Self {
		match err {
			SignerError::AccountNotFound => IntentError::AccountNotFound,
			SignerError::EmptyOrderSet => IntentError::EmptyOrderSet,
			other => IntentError::Signer(other),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_signer_errors_keep_their_meaning() {
		assert!(matches!(
			IntentError::from(SignerError::AccountNotFound),
			IntentError::AccountNotFound
		));
		assert!(matches!(
			IntentError::from(SignerError::EmptyOrderSet),
			IntentError::EmptyOrderSet
		));
		assert!(matches!(
			IntentError::from(SignerError::MalformedSignature("short".into())),
			IntentError::Signer(SignerError::MalformedSignature(_))
		));
	}

	#[test]
	fn test_wait_error_is_transparent() {
		let err = IntentError::from(WaitError::Cancelled);
		assert_eq!(err.to_string(), "Observation cancelled");
	}
}
