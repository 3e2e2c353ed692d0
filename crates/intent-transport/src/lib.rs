//! Transport module for the intent client.
//!
//! This module handles JSON-RPC communication with the three remote peers the
//! client talks to: the bundler (execution node), the intent-quote service and
//! the relayer. A [`TransportRouter`] presents the three of them as a single
//! endpoint and forwards each call by method-name prefix.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

pub mod router;

pub use implementations::http::HttpTransport;
pub use router::{MethodMatcher, Peer, Route, TransportRouter};

/// Errors that can occur while talking to a remote peer.
///
/// Errors are cloneable so one failed call can be reported to every waiter
/// that shares it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The peer answered with a non-success HTTP status.
	#[error("HTTP {status}: {message}")]
	Http { status: u16, message: String },
	/// The peer answered with a JSON-RPC error object.
	#[error("RPC error {code}: {message}")]
	Rpc {
		code: i64,
		message: String,
		data: Option<Value>,
	},
	/// Request parameters could not be serialized.
	#[error("Encoding error: {0}")]
	Encoding(String),
	/// The response could not be decoded.
	#[error("Decoding error: {0}")]
	Decoding(String),
}

/// A JSON-RPC endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Sends `method` with `params` and returns the `result` member of the
	/// response.
	async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError>;
}

/// Calls `method` with serializable `params` and decodes the result.
pub async fn call<T, P, R>(transport: &T, method: &str, params: P) -> Result<R, TransportError>
where
	T: Transport + ?Sized,
	P: Serialize,
	R: DeserializeOwned,
{
	let params = serde_json::to_value(params).map_err(|e| TransportError::Encoding(e.to_string()))?;
	let result = transport.request(method, params).await?;
	serde_json::from_value(result).map_err(|e| TransportError::Decoding(format!("{method}: {e}")))
}
