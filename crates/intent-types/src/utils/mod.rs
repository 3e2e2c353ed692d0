//! Utility functions and protocol constants.

pub mod constants;
pub mod eip712;
pub mod formatting;
pub mod helpers;

pub use constants::*;
pub use eip712::{
	chain_agnostic_hash, compute_domain_hash, compute_final_digest, Eip712AbiEncoder,
	DOMAIN_TYPE, KERNEL_WRAPPER_TYPE, NAME_KERNEL,
};
pub use formatting::truncate_id;
pub use helpers::custom_nonce_key_from_string;
