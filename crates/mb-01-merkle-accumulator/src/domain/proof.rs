//! # Inclusion Proofs
//!
//! Stateless verification: fold a leaf through 32 sibling hashes chosen by
//! the bits of its index. The result is a candidate root, independent of any
//! stored tree, so a proof can be checked against any root ever accepted.

use super::zero_hashes::{hash_concat, TREE_DEPTH};
use serde::{Deserialize, Serialize};
use shared_types::Hash;

/// Fold `leaf` up to a root.
///
/// Bit `i` of `index` = 0: `keccak(current ‖ proof[i])`.
/// Bit `i` of `index` = 1: `keccak(proof[i] ‖ current)`.
pub fn branch_root(leaf: &Hash, proof: &[Hash; TREE_DEPTH], index: u32) -> Hash {
    let mut current = *leaf;
    for (level, sibling) in proof.iter().enumerate() {
        current = if (index >> level) & 1 == 1 {
            hash_concat(sibling, &current)
        } else {
            hash_concat(&current, sibling)
        };
    }
    current
}

/// A leaf, its index and its sibling path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// The leaf
    pub leaf: Hash,
    /// Leaf position
    pub index: u32,
    /// Sibling hashes from the leaf level upward
    pub path: [Hash; TREE_DEPTH],
}

impl MerkleProof {
    /// Root produced by folding the proof.
    pub fn root(&self) -> Hash {
        branch_root(&self.leaf, &self.path, self.index)
    }

    /// True when the proof folds to `root`.
    pub fn verify(&self, root: &Hash) -> bool {
        self.root() == *root
    }
}
