//! Canonical order hashing.
//!
//! An order hash is chain agnostic: it never includes the origin chain or the
//! settler, so the same order hashes identically wherever it is verified.
//! Two layouts exist and the order's `orderDataType` selects between them:
//!
//! - same-chain: `keccak256(abi.encode(user, nonce, openDeadline, fillDeadline,
//!   orderDataType, keccak256(orderData)))`
//! - legacy: the same without the nonce word

use alloy_primitives::{keccak256, B256};
use intent_types::utils::{Eip712AbiEncoder, SAME_CHAIN_ORDER_DATA_TYPE};
use intent_types::{GaslessCrossChainOrder, OrderHash};

/// Computes order hashes given the tag that marks same-chain orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderHasher {
	same_chain_tag: B256,
}

impl Default for OrderHasher {
	fn default() -> Self {
		Self::new(SAME_CHAIN_ORDER_DATA_TYPE)
	}
}

impl OrderHasher {
	pub fn new(same_chain_tag: B256) -> Self {
		Self { same_chain_tag }
	}

	pub fn same_chain_tag(&self) -> B256 {
		self.same_chain_tag
	}

	/// Hash of `order`.
	///
	/// Any tag other than the same-chain tag uses the legacy layout.
	pub fn hash(&self, order: &GaslessCrossChainOrder) -> OrderHash {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_address(&order.user);
		if order.order_data_type == self.same_chain_tag {
			enc.push_u256(order.nonce);
		}
		enc.push_u32(order.open_deadline);
		enc.push_u32(order.fill_deadline);
		enc.push_b256(&order.order_data_type);
		enc.push_b256(&keccak256(&order.order_data));
		keccak256(enc.finish())
	}
}

/// Hash of `order` with the built-in same-chain tag.
pub fn order_hash(order: &GaslessCrossChainOrder) -> OrderHash {
	OrderHasher::default().hash(order)
}
