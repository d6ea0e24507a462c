//! # Domain Errors

use thiserror::Error;

/// Merkle accumulator errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// Every one of the `2^32 - 1` leaf slots is used.
    #[error("Merkle tree full: {count} leaves")]
    TreeFull {
        /// Leaf count at the time of the failed insert
        count: u64,
    },

    /// Requested leaf index is not below the leaf count.
    #[error("Leaf index {index} out of range for {count} leaves")]
    IndexOutOfRange {
        /// Requested index
        index: u32,
        /// Leaf count the proof was requested against
        count: u64,
    },

    /// Requested historical count is larger than the number of known leaves.
    #[error("Count {requested} exceeds known leaves {known}")]
    CountExceedsLeaves {
        /// Requested count
        requested: u64,
        /// Leaves held by the prover
        known: u64,
    },
}
