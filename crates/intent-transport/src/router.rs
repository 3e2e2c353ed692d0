//! Method-prefix routing across the client's remote peers.
//!
//! Routes are evaluated in order and the first match wins; a method no route
//! matches goes to the default peer. Choosing a peer performs no I/O.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{Transport, TransportError};

/// Remote peers reachable through the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peer {
	/// Execution node and bundler (`eth_*` and everything unmatched).
	Bundler,
	/// Intent-quote service (`ui_*`).
	Intent,
	/// Relayer service (`rl_*`).
	Relayer,
}

impl fmt::Display for Peer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Peer::Bundler => write!(f, "bundler"),
			Peer::Intent => write!(f, "intent"),
			Peer::Relayer => write!(f, "relayer"),
		}
	}
}

/// Predicate over method names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatcher {
	Prefix(String),
	Exact(String),
}

impl MethodMatcher {
	pub fn prefix(prefix: impl Into<String>) -> Self {
		Self::Prefix(prefix.into())
	}

	pub fn matches(&self, method: &str) -> bool {
		match self {
			MethodMatcher::Prefix(prefix) => method.starts_with(prefix.as_str()),
			MethodMatcher::Exact(name) => method == name,
		}
	}
}

/// One entry of the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
	pub matcher: MethodMatcher,
	pub peer: Peer,
}

impl Route {
	pub fn new(matcher: MethodMatcher, peer: Peer) -> Self {
		Self { matcher, peer }
	}
}

/// Routing table used by the intent client.
pub fn default_routes() -> Vec<Route> {
	vec![
		Route::new(MethodMatcher::prefix("eth_"), Peer::Bundler),
		Route::new(MethodMatcher::prefix("ui_"), Peer::Intent),
		Route::new(MethodMatcher::prefix("rl_"), Peer::Relayer),
	]
}

/// A single JSON-RPC endpoint backed by three peers.
///
/// Calls are forwarded unchanged: no retries, no merging of answers.
#[derive(Clone)]
pub struct TransportRouter {
	routes: Vec<Route>,
	fallback: Peer,
	bundler: Arc<dyn Transport>,
	intent: Arc<dyn Transport>,
	relayer: Arc<dyn Transport>,
}

impl fmt::Debug for TransportRouter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TransportRouter")
			.field("routes", &self.routes)
			.field("fallback", &self.fallback)
			.finish_non_exhaustive()
	}
}

impl TransportRouter {
	/// Creates a router with the default routing table.
	pub fn new(
		bundler: Arc<dyn Transport>,
		intent: Arc<dyn Transport>,
		relayer: Arc<dyn Transport>,
	) -> Self {
		Self {
			routes: default_routes(),
			fallback: Peer::Bundler,
			bundler,
			intent,
			relayer,
		}
	}

	/// Adds `route` ahead of the existing routes.
	pub fn with_route(mut self, route: Route) -> Self {
		self.routes.insert(0, route);
		self
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Peer that serves `method`.
	pub fn resolve(&self, method: &str) -> Peer {
		self.routes
			.iter()
			.find(|route| route.matcher.matches(method))
			.map(|route| route.peer)
			.unwrap_or(self.fallback)
	}

	fn transport(&self, peer: Peer) -> &Arc<dyn Transport> {
		match peer {
			Peer::Bundler => &self.bundler,
			Peer::Intent => &self.intent,
			Peer::Relayer => &self.relayer,
		}
	}
}

#[async_trait]
impl Transport for TransportRouter {
	async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
		let peer = self.resolve(method);
		tracing::debug!(method, %peer, "Routing request");
		self.transport(peer).request(method, params).await
	}
}
