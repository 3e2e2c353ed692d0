//! Shared waiters keyed by observation key.
//!
//! The first waiter registered under a key starts the work that produces the
//! outcome (a poll loop); later waiters under the same key join it. When the
//! work finishes, every waiter attached at that moment receives a clone of
//! the outcome. Dropping the last waiter aborts the work.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tokio::task::AbortHandle;

use super::WaitError;

/// Outcome delivered to every waiter of a key.
pub type Outcome<T> = Result<T, WaitError>;

struct Waiter<T> {
	id: u64,
	sender: oneshot::Sender<Outcome<T>>,
}

struct Entry<T> {
	generation: u64,
	waiters: Vec<Waiter<T>>,
	task: Option<AbortHandle>,
}

struct Inner<T> {
	entries: Mutex<HashMap<String, Entry<T>>>,
	next_id: AtomicU64,
}

impl<T> Inner<T> {
	fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry<T>>> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

/// Registry deduplicating concurrent waits on the same key.
pub struct ObserverRegistry<T> {
	inner: Arc<Inner<T>>,
}

impl<T> Clone for ObserverRegistry<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> Default for ObserverRegistry<T> {
	fn default() -> Self {
		Self {
			inner: Arc::new(Inner {
				entries: Mutex::new(HashMap::new()),
				next_id: AtomicU64::new(1),
			}),
		}
	}
}

impl<T> std::fmt::Debug for ObserverRegistry<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ObserverRegistry")
			.field("keys", &self.inner.entries().len())
			.finish()
	}
}

impl<T> ObserverRegistry<T>
where
	T: Clone + Send + 'static,
{
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a waiter under `key`.
	///
	/// `start` is only called when no work is running for `key`; the future it
	/// returns is spawned and must deliver its outcome through the emitter.
	/// Must be called from within a Tokio runtime.
	pub fn observe<F, Fut>(&self, key: impl Into<String>, start: F) -> Observation<T>
	where
		F: FnOnce(Emitter<T>) -> Fut,
		Fut: Future<Output = ()> + Send + 'static,
	{
		let key = key.into();
		let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
		let (sender, receiver) = oneshot::channel();
		let waiter = Waiter { id, sender };

		let mut entries = self.inner.entries();
		if let Some(entry) = entries.get_mut(&key) {
			entry.waiters.push(waiter);
			tracing::debug!(key = %key, waiters = entry.waiters.len(), "Joined running observation");
		} else {
			// Generations tell a late emitter of an aborted loop apart from a
			// newer loop registered under the same key.
			let generation = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
			let emitter = Emitter {
				key: key.clone(),
				generation,
				inner: self.inner.clone(),
				emitted: false,
			};
			// The lock is held across the spawn so the task cannot emit before
			// its entry exists.
			let task = tokio::spawn(start(emitter)).abort_handle();
			entries.insert(
				key.clone(),
				Entry {
					generation,
					waiters: vec![waiter],
					task: Some(task),
				},
			);
			tracing::debug!(key = %key, "Started observation");
		}
		drop(entries);

		Observation {
			id,
			key,
			receiver: Some(receiver),
			inner: self.inner.clone(),
		}
	}

	/// Number of waiters attached to `key`.
	pub fn waiters(&self, key: &str) -> usize {
		self.inner
			.entries()
			.get(key)
			.map(|entry| entry.waiters.len())
			.unwrap_or(0)
	}

	/// Whether work is running for `key`.
	pub fn is_observing(&self, key: &str) -> bool {
		self.inner.entries().contains_key(key)
	}
}

/// Handle through which the work of a key delivers its outcome.
///
/// Emitting consumes the handle, so each key's work resolves at most once.
/// Dropping it without emitting rejects the attached waiters with
/// [`WaitError::Cancelled`].
pub struct Emitter<T> {
	key: String,
	generation: u64,
	inner: Arc<Inner<T>>,
	emitted: bool,
}

impl<T: Clone> Emitter<T> {
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Sends `outcome` to every attached waiter and releases the key.
	pub fn emit(mut self, outcome: Outcome<T>) {
		self.emitted = true;
		self.deliver(outcome);
	}

	fn deliver(&self, outcome: Outcome<T>) {
		let entry = {
			let mut entries = self.inner.entries();
			match entries.get(&self.key) {
				Some(entry) if entry.generation == self.generation => entries.remove(&self.key),
				_ => None,
			}
		};

		let Some(entry) = entry else {
			return;
		};
		for waiter in entry.waiters {
			// A waiter whose receiver is gone is detaching concurrently.
			let _ = waiter.sender.send(outcome.clone());
		}
	}
}

impl<T> Drop for Emitter<T> {
	fn drop(&mut self) {
		if self.emitted {
			return;
		}
		let mut entries = self.inner.entries();
		let owned = matches!(entries.get(&self.key), Some(entry) if entry.generation == self.generation);
		if owned {
			if let Some(entry) = entries.remove(&self.key) {
				for waiter in entry.waiters {
					let _ = waiter.sender.send(Err(WaitError::Cancelled));
				}
			}
		}
	}
}

/// One waiter's view of an observation.
///
/// Dropping the handle (or calling [`Observation::detach`]) removes the
/// waiter; when it was the last one the underlying work is aborted.
pub struct Observation<T> {
	id: u64,
	key: String,
	receiver: Option<oneshot::Receiver<Outcome<T>>>,
	inner: Arc<Inner<T>>,
}

impl<T> Observation<T> {
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Waits for the outcome of the observation.
	pub async fn wait(mut self) -> Outcome<T> {
		let Some(receiver) = self.receiver.as_mut() else {
			return Err(WaitError::Cancelled);
		};
		let outcome = receiver.await.unwrap_or(Err(WaitError::Cancelled));
		self.receiver = None;
		outcome
	}

	/// Stops waiting.
	pub fn detach(self) {}
}

impl<T> Drop for Observation<T> {
	fn drop(&mut self) {
		if self.receiver.is_none() {
			return;
		}

		let abandoned = {
			let mut entries = self.inner.entries();
			let Some(entry) = entries.get_mut(&self.key) else {
				return;
			};
			let Some(position) = entry.waiters.iter().position(|waiter| waiter.id == self.id) else {
				return;
			};
			entry.waiters.remove(position);

			if entry.waiters.is_empty() {
				entries.remove(&self.key)
			} else {
				None
			}
		};

		// Aborting drops the task's emitter, which takes the lock again.
		if let Some(task) = abandoned.and_then(|entry| entry.task) {
			task.abort();
			tracing::debug!(key = %self.key, "Last waiter detached, observation stopped");
		}
	}
}
