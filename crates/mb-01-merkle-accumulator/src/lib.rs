//! # MB-01 Merkle Accumulator
//!
//! Append-only keccak-256 Merkle tree of fixed depth 32.
//!
//! **Component:** 01
//! **Architecture:** Domain + Algorithms
//!
//! ## Purpose
//!
//! The origin mailbox commits every dispatched message into this tree. The
//! destination mailbox never inserts: it folds inclusion proofs with
//! [`branch_root`] and compares the result against roots it has accepted.
//!
//! ## Structure
//!
//! | Piece | Storage | Cost |
//! |-------|---------|------|
//! | `IncrementalMerkle` | 32 branch hashes + count | O(log n) insert, O(32) root |
//! | `branch_root` | none | 32 hashes |
//! | `Prover` | every leaf | O(n) per proof, any historical count |
//!
//! ## Module Structure
//!
//! ```text
//! mb-01-merkle-accumulator/
//! ├── domain/          # IncrementalMerkle, MerkleProof, zero hashes, errors
//! └── algorithms/      # Prover (full-tree proof generation)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

// Re-exports
pub use algorithms::Prover;
pub use domain::{
    branch_root, hash_concat, IncrementalMerkle, MerkleError, MerkleProof, MAX_LEAVES,
    TREE_DEPTH, ZERO_HASHES,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
