//! JSON-RPC over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Transport, TransportError};

/// HTTP transport posting JSON-RPC 2.0 requests to a single URL.
#[derive(Debug)]
pub struct HttpTransport {
	client: reqwest::Client,
	url: String,
	next_id: AtomicU64,
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
	jsonrpc: &'a str,
	id: u64,
	method: &'a str,
	params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
	#[serde(default)]
	result: Option<Value>,
	#[serde(default)]
	error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
	code: i64,
	message: String,
	#[serde(default)]
	data: Option<Value>,
}

impl HttpTransport {
	/// Creates a transport for `url` whose requests give up after `timeout`.
	pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| TransportError::Network(e.to_string()))?;

		Ok(Self {
			client,
			url: url.into(),
			next_id: AtomicU64::new(1),
		})
	}

	pub fn url(&self) -> &str {
		&self.url
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
		let request = JsonRpcRequest {
			jsonrpc: "2.0",
			id: self.next_id.fetch_add(1, Ordering::Relaxed),
			method,
			params,
		};

		tracing::trace!(url = %self.url, method, id = request.id, "Sending RPC request");

		let response = self
			.client
			.post(&self.url)
			.json(&request)
			.send()
			.await
			.map_err(|e| TransportError::Network(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(TransportError::Http {
				status: status.as_u16(),
				message,
			});
		}

		let body: JsonRpcResponse = response
			.json()
			.await
			.map_err(|e| TransportError::Decoding(e.to_string()))?;
		into_result(body)
	}
}

fn into_result(response: JsonRpcResponse) -> Result<Value, TransportError> {
	if let Some(error) = response.error {
		return Err(TransportError::Rpc {
			code: error.code,
			message: error.message,
			data: error.data,
		});
	}
	// A missing result is a null result: receipt getters answer null until
	// the receipt exists.
	Ok(response.result.unwrap_or(Value::Null))
}
