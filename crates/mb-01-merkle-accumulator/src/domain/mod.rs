//! # Domain Module
//!
//! Tree state, proofs and the zero-subtree table.

pub mod errors;
pub mod proof;
pub mod tree;
pub mod zero_hashes;

pub use errors::*;
pub use proof::{branch_root, MerkleProof};
pub use tree::IncrementalMerkle;
pub use zero_hashes::{hash_concat, MAX_LEAVES, TREE_DEPTH, ZERO_HASHES};
