//! ERC-6492 signature unwrapping.
//!
//! Counterfactual accounts wrap their signatures as
//! `abi.encode(factory, factoryCalldata, signature) ‖ magicSuffix` so a verifier
//! can deploy the account first. The relayer expects the inner signature.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolValue;
use intent_types::utils::ERC6492_MAGIC_SUFFIX;

use crate::SignerError;

/// Whether `signature` carries the ERC-6492 suffix.
pub fn is_erc6492(signature: &[u8]) -> bool {
	signature.ends_with(ERC6492_MAGIC_SUFFIX.as_slice())
}

/// Returns the inner signature of an ERC-6492 wrapper, or `signature`
/// unchanged when it is not wrapped.
pub fn unwrap_erc6492(signature: Bytes) -> Result<Bytes, SignerError> {
	if !is_erc6492(&signature) {
		return Ok(signature);
	}

	let body = &signature[..signature.len() - ERC6492_MAGIC_SUFFIX.len()];
	let (_factory, _factory_calldata, inner) =
		<(Address, Bytes, Bytes)>::abi_decode_params(body, false)
			.map_err(|e| SignerError::MalformedSignature(e.to_string()))?;
	Ok(inner)
}
