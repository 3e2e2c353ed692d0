//! Small helpers derived from protocol hashing rules.

use alloy_primitives::{keccak256, U256};

/// Derives a 160-bit nonce key from an arbitrary label.
///
/// The key is the first 20 bytes of `keccak256(label)` read as a big-endian
/// integer, so the same label always maps to the same nonce lane.
pub fn custom_nonce_key_from_string(label: &str) -> U256 {
	let hash = keccak256(label.as_bytes());
	U256::from_be_slice(&hash[..20])
}
