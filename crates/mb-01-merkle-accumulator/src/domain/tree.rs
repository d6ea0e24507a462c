//! # Incremental Merkle Tree
//!
//! Keeps one "filled left sibling" per level. Inserting leaf number `n + 1`
//! walks up from the leaf while the corresponding bit of the new count is
//! zero, hashing with the stored left siblings, and stores the running node
//! at the first level whose bit is one.
//!
//! ```text
//! count = 6 (0b110)
//! level 2: branch[2] = root of leaves 0..4     bit 2 = 1
//! level 1: branch[1] = root of leaves 4..6     bit 1 = 1
//! level 0: branch[0] stale                      bit 0 = 0
//! ```

use super::errors::MerkleError;
use super::zero_hashes::{hash_concat, MAX_LEAVES, TREE_DEPTH, ZERO_HASHES};
use serde::{Deserialize, Serialize};
use shared_types::{Hash, ZERO_HASH};

/// Append-only Merkle accumulator.
///
/// INVARIANT: `branch[i]` is meaningful only while bit `i` of `count` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementalMerkle {
    branch: [Hash; TREE_DEPTH],
    count: u64,
}

impl Default for IncrementalMerkle {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalMerkle {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            branch: [ZERO_HASH; TREE_DEPTH],
            count: 0,
        }
    }

    /// Number of inserted leaves.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// True when no leaf has been inserted.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append a leaf. Returns the index it was stored at (`count - 1`).
    pub fn insert(&mut self, leaf: Hash) -> Result<u32, MerkleError> {
        if self.count >= MAX_LEAVES {
            return Err(MerkleError::TreeFull { count: self.count });
        }

        self.count += 1;
        let index = (self.count - 1) as u32;
        let mut size = self.count;
        let mut node = leaf;

        for level in 0..TREE_DEPTH {
            if size & 1 == 1 {
                self.branch[level] = node;
                return Ok(index);
            }
            node = hash_concat(&self.branch[level], &node);
            size >>= 1;
        }

        // count <= MAX_LEAVES always has a set bit below TREE_DEPTH
        Err(MerkleError::TreeFull { count: self.count })
    }

    /// Current root. Empty subtrees contribute their zero hash.
    pub fn root(&self) -> Hash {
        let mut node = ZERO_HASH;
        for level in 0..TREE_DEPTH {
            if (self.count >> level) & 1 == 1 {
                node = hash_concat(&self.branch[level], &node);
            } else {
                node = hash_concat(&node, &ZERO_HASHES[level]);
            }
        }
        node
    }

    #[cfg(test)]
    pub(crate) fn with_count(count: u64) -> Self {
        Self {
            branch: [ZERO_HASH; TREE_DEPTH],
            count,
        }
    }
}
