//! # Prover
//!
//! Full-history tree used by relayers to build inclusion proofs. It keeps
//! every leaf, so it can produce a proof for any index against the root at
//! any earlier count. This is how a proof for a checkpoint that is no longer
//! the latest is regenerated.
//!
//! The construction is level-by-level and shares no code with
//! [`IncrementalMerkle`](crate::IncrementalMerkle), which makes it usable as a
//! reference when checking the incremental tree.

use crate::domain::{hash_concat, MerkleError, MerkleProof, MAX_LEAVES, TREE_DEPTH, ZERO_HASHES};
use shared_types::{Hash, ZERO_HASH};

/// Leaf store with proof generation.
#[derive(Clone, Debug, Default)]
pub struct Prover {
    leaves: Vec<Hash>,
}

impl Prover {
    /// Create an empty prover.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an ordered leaf list.
    pub fn from_leaves(leaves: impl IntoIterator<Item = Hash>) -> Result<Self, MerkleError> {
        let mut prover = Self::new();
        for leaf in leaves {
            prover.ingest(leaf)?;
        }
        Ok(prover)
    }

    /// Append a leaf. Returns its index.
    pub fn ingest(&mut self, leaf: Hash) -> Result<u32, MerkleError> {
        let count = self.count();
        if count >= MAX_LEAVES {
            return Err(MerkleError::TreeFull { count });
        }
        self.leaves.push(leaf);
        Ok(count as u32)
    }

    /// Number of leaves held.
    pub fn count(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Leaf at `index`, if present.
    pub fn leaf(&self, index: u32) -> Option<Hash> {
        self.leaves.get(index as usize).copied()
    }

    /// Root over every leaf held.
    pub fn root(&self) -> Hash {
        fold_to_root(self.leaves.clone())
    }

    /// Root the tree had when it contained `count` leaves.
    pub fn root_at(&self, count: u64) -> Result<Hash, MerkleError> {
        let prefix = self.prefix(count)?;
        Ok(fold_to_root(prefix.to_vec()))
    }

    /// Proof for `index` against the current root.
    pub fn prove(&self, index: u32) -> Result<MerkleProof, MerkleError> {
        self.prove_at(index, self.count())
    }

    /// Proof for `index` against the root at `count` leaves.
    pub fn prove_at(&self, index: u32, count: u64) -> Result<MerkleProof, MerkleError> {
        let prefix = self.prefix(count)?;
        if u64::from(index) >= count {
            return Err(MerkleError::IndexOutOfRange { index, count });
        }

        let mut level = prefix.to_vec();
        let mut path = [ZERO_HASH; TREE_DEPTH];
        let mut position = index as usize;

        for (height, slot) in path.iter_mut().enumerate() {
            *slot = level
                .get(position ^ 1)
                .copied()
                .unwrap_or(ZERO_HASHES[height]);
            level = parent_level(&level, height);
            position >>= 1;
        }

        Ok(MerkleProof {
            leaf: prefix[index as usize],
            index,
            path,
        })
    }

    fn prefix(&self, count: u64) -> Result<&[Hash], MerkleError> {
        if count > self.count() {
            return Err(MerkleError::CountExceedsLeaves {
                requested: count,
                known: self.count(),
            });
        }
        Ok(&self.leaves[..count as usize])
    }
}

/// Pair up nodes at `height`, padding a trailing left node with the zero
/// subtree of the same height.
fn parent_level(level: &[Hash], height: usize) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| {
            let right = pair.get(1).unwrap_or(&ZERO_HASHES[height]);
            hash_concat(&pair[0], right)
        })
        .collect()
}

fn fold_to_root(mut level: Vec<Hash>) -> Hash {
    for height in 0..TREE_DEPTH {
        level = parent_level(&level, height);
    }
    level.first().copied().unwrap_or(ZERO_HASHES[TREE_DEPTH])
}
