//! # MB-04 Validator Manager
//!
//! Maps each origin domain to the validators allowed to sign its checkpoints,
//! and halts origins shown to have been checkpointed improperly.
//!
//! **Component:** 04
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Responsibilities
//!
//! | Operation | Access | Effect |
//! |-----------|--------|--------|
//! | `set_validator` | owner | replace a domain's set with one signer, threshold 1 |
//! | `enroll_validator` / `unenroll_validator` | owner | grow / shrink a domain's set |
//! | `set_threshold` | owner | signatures required for a quorum |
//! | `is_validator_signature` | anyone | single-signer predicate |
//! | `is_quorum` | anyone | threshold predicate, signers in ascending order |
//! | `improper_checkpoint` | anyone | halt an origin on a quorum-signed checkpoint it never produced |
//!
//! Changes take effect immediately. There is no history of which set was
//! authoritative when a given checkpoint was signed.
//!
//! ## Fraud Proof
//!
//! ```text
//! signed (root, index) ──recover──→ quorum? ──origin.cached_checkpoint_index(root)──→
//!     == index : rejected (ProperCheckpoint)
//!     != index : origin.fail(), ImproperCheckpoint + Fail events
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{FraudReport, ValidatorError, ValidatorResult, ValidatorSet};
pub use ports::{FraudTarget, ValidatorRegistry};
pub use service::ValidatorManager;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
