//! Order types for the intent client.
//!
//! This module defines the gasless cross-chain order returned by the intent
//! service, the signed order submitted to the relayer, and the intent
//! protocol versions the client can speak.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Canonical 32-byte digest of an order.
///
/// Used as the leaf of a signature batch and as the correlation key when an
/// order is submitted to the relayer.
pub type OrderHash = B256;

/// A gasless cross-chain order as produced by the intent service.
///
/// The `order_data` payload is opaque to this client: it is hashed but never
/// decoded. Which hash layout applies is decided by `order_data_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaslessCrossChainOrder {
	/// Settlement contract on the origin chain.
	pub origin_settler: Address,
	/// Account that authorized the order.
	pub user: Address,
	/// Anti-replay nonce; only part of the hash for same-chain orders.
	pub nonce: U256,
	/// Chain the order was quoted for.
	pub origin_chain_id: U256,
	/// Deadline by which the order must be opened.
	pub open_deadline: u32,
	/// Deadline by which the order must be filled.
	pub fill_deadline: u32,
	/// Tag identifying the encoding of `order_data`.
	pub order_data_type: B256,
	/// Encoded call data and payment parameters.
	pub order_data: Bytes,
}

/// An order together with the signature that authorizes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOrder {
	pub order: GaslessCrossChainOrder,
	pub signature: Bytes,
}

/// Intent protocol versions understood by the relayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntentVersion {
	#[serde(rename = "0.0.2")]
	V0_0_2,
	#[serde(rename = "0.0.3")]
	V0_0_3,
	#[serde(rename = "0.0.4")]
	V0_0_4,
}

impl IntentVersion {
	pub const ALL: [IntentVersion; 3] =
		[IntentVersion::V0_0_2, IntentVersion::V0_0_3, IntentVersion::V0_0_4];

	pub fn as_str(&self) -> &'static str {
		match self {
			IntentVersion::V0_0_2 => "0.0.2",
			IntentVersion::V0_0_3 => "0.0.3",
			IntentVersion::V0_0_4 => "0.0.4",
		}
	}
}

impl fmt::Display for IntentVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown intent version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown intent version: {0}")]
pub struct UnknownIntentVersion(pub String);

impl FromStr for IntentVersion {
	type Err = UnknownIntentVersion;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		IntentVersion::ALL
			.into_iter()
			.find(|v| v.as_str() == s)
			.ok_or_else(|| UnknownIntentVersion(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, b256};

	#[test]
	fn test_order_json_uses_camel_case() {
		let order = GaslessCrossChainOrder {
			origin_settler: address!("1111111111111111111111111111111111111111"),
			user: address!("2222222222222222222222222222222222222222"),
			nonce: U256::from(7),
			origin_chain_id: U256::from(8453),
			open_deadline: 100,
			fill_deadline: 200,
			order_data_type: b256!(
				"bdf58e44a925664a3b0db1531eb18b5fc62ea206156ef6b3321f9fc39282f7ec"
			),
			order_data: Bytes::from_static(&[0xde, 0xad]),
		};

		let value = serde_json::to_value(&order).unwrap();
		assert!(value.get("originSettler").is_some());
		assert!(value.get("openDeadline").is_some());
		assert_eq!(value["orderData"], "0xdead");

		let back: GaslessCrossChainOrder = serde_json::from_value(value).unwrap();
		assert_eq!(back, order);
	}

	#[test]
	fn test_order_data_type_accepts_uppercase_hex() {
		let json = serde_json::json!({
			"originSettler": "0x1111111111111111111111111111111111111111",
			"user": "0x2222222222222222222222222222222222222222",
			"nonce": "0x7",
			"originChainId": "0x1",
			"openDeadline": 1,
			"fillDeadline": 2,
			"orderDataType": "0xBDF58E44A925664A3B0DB1531EB18B5FC62EA206156EF6B3321F9FC39282F7EC",
			"orderData": "0x"
		});
		let order: GaslessCrossChainOrder = serde_json::from_value(json).unwrap();
		assert_eq!(
			order.order_data_type,
			b256!("bdf58e44a925664a3b0db1531eb18b5fc62ea206156ef6b3321f9fc39282f7ec")
		);
	}

	#[test]
	fn test_intent_version_round_trip_through_str() {
		for version in IntentVersion::ALL {
			assert_eq!(version.as_str().parse::<IntentVersion>().unwrap(), version);
		}
		assert!("0.1.0".parse::<IntentVersion>().is_err());
		assert_eq!(serde_json::to_value(IntentVersion::V0_0_3).unwrap(), "0.0.3");
	}
}
