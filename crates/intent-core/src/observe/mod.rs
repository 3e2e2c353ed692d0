//! Receipt observation.
//!
//! Waiting for a receipt polls the relayer until it answers with a non-null
//! receipt. Concurrent waits for the same receipt share one poll loop through
//! the [`ObserverRegistry`].

use std::time::Duration;

use alloy_primitives::B256;
use intent_transport::TransportError;
use intent_types::utils::DEFAULT_RECEIPT_TIMEOUT_MS;
use intent_types::ReceiptKind;
use thiserror::Error;

mod poll;
mod registry;

pub use poll::{poll_until, PollSettings};
pub use registry::{Emitter, Observation, ObserverRegistry, Outcome};

/// Errors that end a wait.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaitError {
	/// Neither the retry budget nor the deadline produced a receipt.
	#[error("Timed out waiting for user intent {kind} receipt: {ui_hash}")]
	Timeout { kind: ReceiptKind, ui_hash: B256 },
	/// A poll request failed.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The poll loop stopped without producing an outcome.
	#[error("Observation cancelled")]
	Cancelled,
}

/// Caller-supplied knobs for a receipt wait.
///
/// Unset fields fall back to the client's settings. When several callers wait
/// on the same receipt, the options of the one that started the poll loop
/// apply to all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
	/// Delay between two polls.
	pub polling_interval: Option<Duration>,
	/// Maximum number of polls. `None` or zero polls until the deadline.
	pub retry_count: Option<u32>,
	/// Wall-clock limit. `None` or zero waits forever.
	pub timeout: Option<Duration>,
}

impl Default for WaitOptions {
	fn default() -> Self {
		Self {
			polling_interval: None,
			retry_count: None,
			timeout: Some(Duration::from_millis(DEFAULT_RECEIPT_TIMEOUT_MS)),
		}
	}
}

impl WaitOptions {
	pub fn with_polling_interval(mut self, interval: Duration) -> Self {
		self.polling_interval = Some(interval);
		self
	}

	pub fn with_retry_count(mut self, retry_count: u32) -> Self {
		self.retry_count = Some(retry_count);
		self
	}

	pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
		self.timeout = timeout;
		self
	}
}

/// Key under which waits for the same receipt are shared.
///
/// The client id keeps two clients from sharing a loop, since they may point
/// at different peers.
pub fn observer_key(operation: &str, client_uid: &str, ui_hash: &B256) -> String {
	serde_json::json!([operation, client_uid, ui_hash.to_string()]).to_string()
}
