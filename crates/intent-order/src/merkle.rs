//! Merkle tree over order leaves using sorted hash pairs.
//!
//! Pairs are hashed as `keccak256(min(a, b) ‖ max(a, b))`, so a proof is a
//! plain list of siblings and verification does not need the leaf position.
//! The last node of an odd-sized layer is promoted to the next layer as is.

use alloy_primitives::{keccak256, B256};
use thiserror::Error;

/// Maximum supported number of leaves.
const MAX_LEAVES: usize = 1 << 20;

/// A Merkle tree with every layer materialized.
///
/// `layers[0]` holds the leaves in input order and the last layer holds the
/// root alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
	layers: Vec<Vec<B256>>,
}

impl MerkleTree {
	/// Builds the tree over `leaves`, preserving their order.
	pub fn from_leaves(leaves: Vec<B256>) -> Result<Self, MerkleError> {
		if leaves.is_empty() {
			return Err(MerkleError::EmptyTree);
		}
		if leaves.len() > MAX_LEAVES {
			return Err(MerkleError::TooLarge);
		}

		let mut layers = Vec::with_capacity(log2_ceil(leaves.len()) + 1);
		layers.push(leaves);

		let mut hash_buffer = [0u8; 64];
		while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
			let next: Vec<B256> = current
				.chunks(2)
				.map(|pair| match pair.get(1) {
					Some(right) => hash_leaf_pairs(&pair[0], right, &mut hash_buffer),
					None => pair[0],
				})
				.collect();
			layers.push(next);
		}

		Ok(Self { layers })
	}

	/// Number of leaves.
	#[inline]
	pub fn len(&self) -> usize {
		self.layers[0].len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.layers[0].is_empty()
	}

	/// Number of hashing layers above the leaves.
	#[inline]
	pub fn height(&self) -> usize {
		self.layers.len() - 1
	}

	#[inline]
	pub fn leaves(&self) -> &[B256] {
		&self.layers[0]
	}

	/// Root of the tree; the leaf itself for a single-leaf tree.
	pub fn root(&self) -> B256 {
		self.layers[self.layers.len() - 1][0]
	}

	/// Siblings needed to climb from leaf `index` to the root.
	///
	/// Promoted nodes have no sibling on their layer and contribute nothing,
	/// so a single-leaf tree yields an empty proof.
	pub fn proof(&self, index: usize) -> Result<Vec<B256>, MerkleError> {
		if index >= self.len() {
			return Err(MerkleError::IndexOutOfBounds {
				index,
				tree_size: self.len(),
			});
		}

		let mut proof = Vec::with_capacity(self.height());
		let mut current_index = index;
		for layer in &self.layers[..self.height()] {
			// Flipping the low bit gives the other member of the pair.
			let sibling_index = current_index ^ 1;
			if let Some(sibling) = layer.get(sibling_index) {
				proof.push(*sibling);
			}
			current_index /= 2;
		}

		Ok(proof)
	}

	/// Checks that `leaf` is included under `root`.
	pub fn verify_proof(root: &B256, proof: &[B256], leaf: &B256) -> bool {
		let mut hash_buffer = [0u8; 64];
		let computed = proof.iter().fold(*leaf, |rolling, sibling| {
			hash_leaf_pairs(&rolling, sibling, &mut hash_buffer)
		});
		computed == *root
	}
}

/// Hashes two nodes in ascending order.
#[inline(always)]
fn hash_leaf_pairs(left: &B256, right: &B256, buffer: &mut [u8; 64]) -> B256 {
	let (first, second) = if left < right { (left, right) } else { (right, left) };

	buffer[..32].copy_from_slice(first.as_slice());
	buffer[32..].copy_from_slice(second.as_slice());

	keccak256(&buffer[..])
}

/// Calculate the ceiling of log2(x)
#[inline]
fn log2_ceil(x: usize) -> usize {
	match x {
		0 | 1 => 0,
		_ => (x - 1).ilog2() as usize + 1,
	}
}

/// Errors that can occur during Merkle tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
	/// No leaves were supplied.
	#[error("Cannot build a tree without leaves")]
	EmptyTree,
	/// Leaf index out of bounds.
	#[error("Leaf index {index} out of bounds (tree has {tree_size} leaves)")]
	IndexOutOfBounds {
		/// The index that was requested
		index: usize,
		/// The actual size of the tree
		tree_size: usize,
	},
	/// Exceeds maximum supported size.
	#[error("Exceeds maximum supported size")]
	TooLarge,
}
