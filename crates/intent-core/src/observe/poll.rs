//! Fixed-interval polling with a retry budget and a deadline.

use std::future::Future;
use std::time::Duration;

use super::WaitError;

/// Schedule of a poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
	/// Delay between two attempts.
	pub interval: Duration,
	/// Whether the first attempt runs immediately instead of after one interval.
	pub emit_on_begin: bool,
	/// Maximum number of attempts. `None` or zero means unbounded.
	pub retry_count: Option<u32>,
	/// Wall-clock limit for the whole loop. `None` or zero means unbounded.
	pub timeout: Option<Duration>,
}

impl PollSettings {
	fn max_attempts(&self) -> Option<u32> {
		self.retry_count.filter(|count| *count > 0)
	}

	fn deadline(&self) -> Option<Duration> {
		self.timeout.filter(|timeout| !timeout.is_zero())
	}
}

/// Calls `fetch` on the schedule in `settings` until it yields a value.
///
/// A fetch error ends the loop with that error. Exhausting the retry budget or
/// hitting the deadline ends it with `on_timeout`, whichever comes first.
pub async fn poll_until<T, F, Fut>(
	settings: PollSettings,
	on_timeout: WaitError,
	mut fetch: F,
) -> Result<T, WaitError>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<Option<T>, WaitError>>,
{
	let max_attempts = settings.max_attempts();
	let interval = settings.interval;
	let emit_on_begin = settings.emit_on_begin;

	let attempts = async {
		let mut attempt: u32 = 0;
		if !emit_on_begin {
			tokio::time::sleep(interval).await;
		}
		loop {
			if let Some(max) = max_attempts {
				if attempt >= max {
					tracing::debug!(attempts = attempt, "Retry budget exhausted");
					return Err(on_timeout.clone());
				}
			}

			let result = fetch().await?;
			attempt = attempt.saturating_add(1);
			if let Some(value) = result {
				tracing::debug!(attempts = attempt, "Poll produced a value");
				return Ok(value);
			}

			tokio::time::sleep(interval).await;
		}
	};

	match settings.deadline() {
		Some(deadline) => match tokio::time::timeout(deadline, attempts).await {
			Ok(outcome) => outcome,
			Err(_) => {
				tracing::debug!(deadline_ms = deadline.as_millis() as u64, "Poll deadline reached");
				Err(on_timeout.clone())
			}
		},
		None => attempts.await,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::B256;
	use intent_transport::TransportError;
	use intent_types::ReceiptKind;
	use std::sync::atomic::{AtomicU32, Ordering};
	use std::sync::Arc;
	use tokio::time::Instant;

	fn timeout_error() -> WaitError {
		WaitError::Timeout {
			kind: ReceiptKind::Open,
			ui_hash: B256::repeat_byte(0x42),
		}
	}

	fn settings(interval_ms: u64, retry_count: Option<u32>, timeout_ms: Option<u64>) -> PollSettings {
		PollSettings {
			interval: Duration::from_millis(interval_ms),
			emit_on_begin: true,
			retry_count,
			timeout: timeout_ms.map(Duration::from_millis),
		}
	}

	/// Fetcher that answers `None` until its `ready_on`-th call.
	fn ready_on(
		calls: Arc<AtomicU32>,
		ready_on: u32,
	) -> impl FnMut() -> std::future::Ready<Result<Option<u32>, WaitError>> {
		move || {
			let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
			std::future::ready(Ok((call >= ready_on).then_some(call)))
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_value_on_third_attempt() {
		let calls = Arc::new(AtomicU32::new(0));
		let start = Instant::now();

		let value = poll_until(
			settings(10, None, Some(1_000)),
			timeout_error(),
			ready_on(calls.clone(), 3),
		)
		.await
		.unwrap();

		assert_eq!(value, 3);
		assert_eq!(calls.load(Ordering::SeqCst), 3);
		let elapsed = start.elapsed();
		assert!(elapsed >= Duration::from_millis(20) && elapsed < Duration::from_millis(30));
	}

	#[tokio::test(start_paused = true)]
	async fn test_first_attempt_waits_without_emit_on_begin() {
		let calls = Arc::new(AtomicU32::new(0));
		let start = Instant::now();
		let mut settings = settings(10, None, None);
		settings.emit_on_begin = false;

		poll_until(settings, timeout_error(), ready_on(calls, 1)).await.unwrap();
		let elapsed = start.elapsed();
		assert!(elapsed >= Duration::from_millis(10) && elapsed < Duration::from_millis(20));
	}

	#[tokio::test(start_paused = true)]
	async fn test_retry_budget_exhausted_before_deadline() {
		let calls = Arc::new(AtomicU32::new(0));
		let start = Instant::now();

		let result = poll_until(
			settings(100, Some(3), Some(120_000)),
			timeout_error(),
			ready_on(calls.clone(), u32::MAX),
		)
		.await;

		assert_eq!(result, Err(timeout_error()));
		assert_eq!(calls.load(Ordering::SeqCst), 3);
		let elapsed = start.elapsed();
		assert!(elapsed >= Duration::from_millis(300) && elapsed < Duration::from_millis(400));
	}

	#[tokio::test(start_paused = true)]
	async fn test_deadline_reached_before_retry_budget() {
		let calls = Arc::new(AtomicU32::new(0));
		let start = Instant::now();

		let result = poll_until(
			settings(100, Some(100), Some(250)),
			timeout_error(),
			ready_on(calls.clone(), u32::MAX),
		)
		.await;

		assert_eq!(result, Err(timeout_error()));
		assert_eq!(calls.load(Ordering::SeqCst), 3);
		let elapsed = start.elapsed();
		assert!(elapsed >= Duration::from_millis(250) && elapsed < Duration::from_millis(300));
	}

	#[tokio::test(start_paused = true)]
	async fn test_zero_timeout_and_retry_count_are_unbounded() {
		let calls = Arc::new(AtomicU32::new(0));

		let value = poll_until(
			settings(1_000, Some(0), Some(0)),
			timeout_error(),
			ready_on(calls.clone(), 500),
		)
		.await
		.unwrap();

		assert_eq!(value, 500);
	}

	#[tokio::test(start_paused = true)]
	async fn test_fetch_error_ends_loop() {
		let calls = Arc::new(AtomicU32::new(0));
		let counter = calls.clone();
		let error = WaitError::Transport(TransportError::Network("connection refused".to_string()));
		let returned = error.clone();

		let result: Result<u32, _> = poll_until(settings(10, None, None), timeout_error(), move || {
			let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
			let outcome = if call == 2 { Err(returned.clone()) } else { Ok(None) };
			std::future::ready(outcome)
		})
		.await;

		assert_eq!(result, Err(error));
		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}
}
