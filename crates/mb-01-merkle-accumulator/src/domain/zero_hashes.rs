//! # Zero Subtree Hashes
//!
//! `ZERO_HASHES[i]` is the root of a subtree of height `i` whose leaves are all
//! zero: `Z[0] = 0`, `Z[i + 1] = keccak(Z[i] ‖ Z[i])`.

use lazy_static::lazy_static;
use shared_types::{keccak256_concat, Hash, ZERO_HASH};

/// Tree depth.
pub const TREE_DEPTH: usize = 32;

/// Maximum number of leaves, `2^32 - 1`.
pub const MAX_LEAVES: u64 = (1u64 << TREE_DEPTH) - 1;

lazy_static! {
    /// Zero subtree roots for heights `0..=TREE_DEPTH`.
    pub static ref ZERO_HASHES: [Hash; TREE_DEPTH + 1] = {
        let mut hashes = [ZERO_HASH; TREE_DEPTH + 1];
        for height in 0..TREE_DEPTH {
            hashes[height + 1] = hash_concat(&hashes[height], &hashes[height]);
        }
        hashes
    };
}

/// keccak(left ‖ right).
pub fn hash_concat(left: &Hash, right: &Hash) -> Hash {
    keccak256_concat(&[left, right])
}
