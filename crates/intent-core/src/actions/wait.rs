//! Waiting for receipts.

use std::time::Duration;

use alloy_primitives::B256;
use intent_transport::call;
use intent_types::utils::MAX_FILL_POLLING_INTERVAL_MS;
use intent_types::{truncate_id, IntentReceipt, ReceiptKind};
use tracing::{instrument, Instrument};

use crate::observe::{observer_key, poll_until, Observation, PollSettings, WaitError, WaitOptions};
use crate::{IntentClient, IntentError};

impl IntentClient {
	/// Polls until the relayer reports the origin-chain open of `ui_hash`.
	#[instrument(skip_all, fields(ui_hash = %truncate_id(&ui_hash.to_string())))]
	pub async fn wait_for_user_intent_open_receipt(
		&self,
		ui_hash: B256,
		options: WaitOptions,
	) -> Result<IntentReceipt, IntentError> {
		self.wait_for_receipt(ReceiptKind::Open, ui_hash, options).await
	}

	/// Polls until the relayer reports the destination-chain execution of
	/// `ui_hash`.
	#[instrument(skip_all, fields(ui_hash = %truncate_id(&ui_hash.to_string())))]
	pub async fn wait_for_user_intent_execution_receipt(
		&self,
		ui_hash: B256,
		options: WaitOptions,
	) -> Result<IntentReceipt, IntentError> {
		self.wait_for_receipt(ReceiptKind::Execution, ui_hash, options).await
	}

	/// Polls until the relayer reports the destination-chain fill of `ui_hash`.
	///
	/// Unless overridden, fills are polled at most every second.
	#[instrument(skip_all, fields(ui_hash = %truncate_id(&ui_hash.to_string())))]
	pub async fn wait_for_user_intent_fill_receipt(
		&self,
		ui_hash: B256,
		options: WaitOptions,
	) -> Result<IntentReceipt, IntentError> {
		self.wait_for_receipt(ReceiptKind::Fill, ui_hash, options).await
	}

	async fn wait_for_receipt(
		&self,
		kind: ReceiptKind,
		ui_hash: B256,
		options: WaitOptions,
	) -> Result<IntentReceipt, IntentError> {
		let observation = self.observe_user_intent_receipt(kind, ui_hash, options)?;
		Ok(observation.wait().await?)
	}

	/// Registers a waiter for the `kind` receipt of `ui_hash`.
	///
	/// Waiters of the same receipt on the same client share one poll loop;
	/// the loop stops once it produced an outcome or every waiter detached.
	pub fn observe_user_intent_receipt(
		&self,
		kind: ReceiptKind,
		ui_hash: B256,
		options: WaitOptions,
	) -> Result<Observation<IntentReceipt>, IntentError> {
		let executor = self.executor_address()?;
		let key = observer_key(kind.wait_operation(), &self.uid, &ui_hash);
		let settings = self.poll_settings(kind, &options);
		let transport = self.transport.clone();

		let observation = self.receipts.observe(key, move |emitter| {
			let fetch = move || {
				let transport = transport.clone();
				async move {
					let result: Result<Option<IntentReceipt>, WaitError> =
						call(transport.as_ref(), kind.rpc_method(), (ui_hash, executor))
							.await
							.map_err(WaitError::from);
					if let Ok(receipt) = &result {
						tracing::debug!(%kind, found = receipt.is_some(), "Polled receipt");
					}
					result
				}
			};

			async move {
				let outcome = poll_until(settings, WaitError::Timeout { kind, ui_hash }, fetch).await;
				match &outcome {
					Ok(_) => tracing::info!(%kind, "Received user intent receipt"),
					Err(err) => tracing::warn!(%kind, error = %err, "Stopped waiting for user intent receipt"),
				}
				emitter.emit(outcome);
			}
			.instrument(tracing::Span::current())
		});

		Ok(observation)
	}

	fn poll_settings(&self, kind: ReceiptKind, options: &WaitOptions) -> PollSettings {
		let interval = options.polling_interval.unwrap_or(match kind {
			ReceiptKind::Fill => self
				.settings
				.polling_interval
				.min(Duration::from_millis(MAX_FILL_POLLING_INTERVAL_MS)),
			ReceiptKind::Open | ReceiptKind::Execution => self.settings.polling_interval,
		});

		PollSettings {
			interval,
			emit_on_begin: true,
			retry_count: options.retry_count,
			timeout: options.timeout,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::actions::receipt::tests::receipt_json;
	use crate::client::tests::{client_with, ScriptedTransport};
	use crate::ClientSettings;
	use intent_order::{OrderHasher, OrderSigner};
	use intent_transport::TransportError;
	use intent_types::IntentVersion;
	use serde_json::Value;
	use std::sync::Arc;
	use tokio::time::Instant;

	const HASH: B256 = B256::repeat_byte(0x5e);

	fn every(ms: u64) -> WaitOptions {
		WaitOptions::default().with_polling_interval(Duration::from_millis(ms))
	}

	fn script(transport: &ScriptedTransport, method: &str, nulls: usize) {
		for _ in 0..nulls {
			transport.respond(method, Ok(Value::Null));
		}
		transport.respond(method, Ok(receipt_json(HASH)));
	}

	#[tokio::test(start_paused = true)]
	async fn test_execution_receipt_on_third_poll() {
		let transport = Arc::new(ScriptedTransport::default());
		script(&transport, "rl_getUserIntentExecutionReceipt", 2);
		let client = client_with(transport.clone(), None);
		let start = Instant::now();

		let receipt = client
			.wait_for_user_intent_execution_receipt(HASH, every(10))
			.await
			.unwrap();

		assert_eq!(receipt.intent_hash, HASH);
		assert_eq!(transport.count("rl_getUserIntentExecutionReceipt"), 3);
		assert!(start.elapsed() >= Duration::from_millis(20));
	}

	#[tokio::test(start_paused = true)]
	async fn test_concurrent_waits_share_polls() {
		let transport = Arc::new(ScriptedTransport::default());
		script(&transport, "rl_getUserIntentOpenReceipt", 2);
		let client = client_with(transport.clone(), None);

		let (a, b) = tokio::join!(
			client.wait_for_user_intent_open_receipt(HASH, every(10)),
			client.wait_for_user_intent_open_receipt(HASH, every(10)),
		);

		assert_eq!(a.unwrap(), b.unwrap());
		assert_eq!(transport.count("rl_getUserIntentOpenReceipt"), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn test_receipt_kinds_poll_separately() {
		let transport = Arc::new(ScriptedTransport::default());
		script(&transport, "rl_getUserIntentOpenReceipt", 0);
		script(&transport, "rl_getUserIntentFillReceipt", 0);
		let client = client_with(transport.clone(), None);

		let (open, fill) = tokio::join!(
			client.wait_for_user_intent_open_receipt(HASH, every(10)),
			client.wait_for_user_intent_fill_receipt(HASH, every(10)),
		);

		assert!(open.is_ok() && fill.is_ok());
		assert_eq!(transport.count("rl_getUserIntentOpenReceipt"), 1);
		assert_eq!(transport.count("rl_getUserIntentFillReceipt"), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn test_retry_budget_times_out() {
		let transport = Arc::new(ScriptedTransport::default());
		transport.respond("rl_getUserIntentOpenReceipt", Ok(Value::Null));
		let client = client_with(transport.clone(), None);
		let start = Instant::now();

		let result = client
			.wait_for_user_intent_open_receipt(HASH, every(100).with_retry_count(3))
			.await;

		match result {
			Err(IntentError::Wait(err)) => {
				assert_eq!(
					err,
					WaitError::Timeout {
						kind: ReceiptKind::Open,
						ui_hash: HASH
					}
				);
				assert_eq!(
					err.to_string(),
					format!("Timed out waiting for user intent open receipt: {HASH}")
				);
			}
			other => panic!("unexpected result: {other:?}"),
		}
		assert_eq!(transport.count("rl_getUserIntentOpenReceipt"), 3);
		assert!(start.elapsed() >= Duration::from_millis(300));
	}

	#[tokio::test(start_paused = true)]
	async fn test_wall_clock_timeout() {
		let transport = Arc::new(ScriptedTransport::default());
		transport.respond("rl_getUserIntentFillReceipt", Ok(Value::Null));
		let client = client_with(transport.clone(), None);
		let start = Instant::now();

		let options = every(100)
			.with_retry_count(100)
			.with_timeout(Some(Duration::from_millis(250)));
		let result = client.wait_for_user_intent_fill_receipt(HASH, options).await;

		assert!(matches!(
			result,
			Err(IntentError::Wait(WaitError::Timeout {
				kind: ReceiptKind::Fill,
				..
			}))
		));
		let elapsed = start.elapsed();
		assert!(elapsed >= Duration::from_millis(250) && elapsed < Duration::from_millis(300));
	}

	#[tokio::test(start_paused = true)]
	async fn test_fill_interval_is_capped_by_default() {
		let transport = Arc::new(ScriptedTransport::default());
		script(&transport, "rl_getUserIntentFillReceipt", 1);
		let client = client_with(transport, None);
		let start = Instant::now();

		client
			.wait_for_user_intent_fill_receipt(HASH, WaitOptions::default())
			.await
			.unwrap();

		let elapsed = start.elapsed();
		assert!(elapsed >= Duration::from_secs(1) && elapsed < Duration::from_secs(2));
	}

	#[test]
	fn test_explicit_interval_is_not_capped() {
		let client = client_with(Arc::new(ScriptedTransport::default()), None);
		let settings = client.poll_settings(ReceiptKind::Fill, &every(3_000));
		assert_eq!(settings.interval, Duration::from_secs(3));

		let settings = client.poll_settings(ReceiptKind::Open, &WaitOptions::default());
		assert_eq!(settings.interval, Duration::from_secs(4));
		assert!(settings.emit_on_begin);
		assert_eq!(settings.timeout, Some(Duration::from_secs(120)));
	}

	#[tokio::test(start_paused = true)]
	async fn test_fetch_error_reaches_every_waiter() {
		let transport = Arc::new(ScriptedTransport::default());
		let failure = TransportError::Http {
			status: 502,
			message: "bad gateway".to_string(),
		};
		transport.respond("rl_getUserIntentOpenReceipt", Ok(Value::Null));
		transport.respond("rl_getUserIntentOpenReceipt", Err(failure.clone()));
		let client = client_with(transport.clone(), None);

		let (a, b) = tokio::join!(
			client.wait_for_user_intent_open_receipt(HASH, every(10)),
			client.wait_for_user_intent_open_receipt(HASH, every(10)),
		);

		for result in [a, b] {
			match result {
				Err(IntentError::Wait(WaitError::Transport(err))) => assert_eq!(err, failure),
				other => panic!("unexpected result: {other:?}"),
			}
		}
		assert_eq!(transport.count("rl_getUserIntentOpenReceipt"), 2);
	}

	#[tokio::test(start_paused = true)]
	async fn test_detaching_one_waiter_keeps_the_other() {
		let transport = Arc::new(ScriptedTransport::default());
		script(&transport, "rl_getUserIntentOpenReceipt", 2);
		let client = client_with(transport.clone(), None);

		let first = client
			.observe_user_intent_receipt(ReceiptKind::Open, HASH, every(10))
			.unwrap();
		let second = client
			.observe_user_intent_receipt(ReceiptKind::Open, HASH, every(10))
			.unwrap();
		assert_eq!(client.receipts.waiters(first.key()), 2);

		first.detach();
		let receipt = second.wait().await.unwrap();
		assert_eq!(receipt.intent_hash, HASH);
		assert_eq!(transport.count("rl_getUserIntentOpenReceipt"), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn test_detaching_last_waiter_stops_polling() {
		let transport = Arc::new(ScriptedTransport::default());
		transport.respond("rl_getUserIntentOpenReceipt", Ok(Value::Null));
		let client = client_with(transport.clone(), None);

		let observation = client
			.observe_user_intent_receipt(ReceiptKind::Open, HASH, every(10))
			.unwrap();
		let key = observation.key().to_string();
		tokio::time::sleep(Duration::from_millis(35)).await;

		observation.detach();
		let polls = transport.count("rl_getUserIntentOpenReceipt");
		assert!(polls >= 1);
		assert!(!client.receipts.is_observing(&key));

		tokio::time::sleep(Duration::from_millis(100)).await;
		assert_eq!(transport.count("rl_getUserIntentOpenReceipt"), polls);
	}

	#[tokio::test]
	async fn test_unknown_executor_fails_before_polling() {
		let transport = Arc::new(ScriptedTransport::default());
		let signer = OrderSigner::new(None, None, OrderHasher::default());
		let client = IntentClient::new(
			transport.clone(),
			signer,
			ClientSettings::new(IntentVersion::V0_0_4),
		);

		let result = client.wait_for_user_intent_open_receipt(HASH, every(10)).await;
		assert!(matches!(result, Err(IntentError::Configuration(_))));
		assert!(transport.calls.lock().unwrap().is_empty());
	}
}
