//! # Algorithms
//!
//! Proof generation over a complete leaf history.

pub mod prover;

pub use prover::Prover;
