//! # MB-03 Origin Mailbox
//!
//! Outbound side of the protocol ("Home" / "Outbox").
//!
//! **Component:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Assign a per-destination nonce to every outbound message
//! - Format it canonically and insert its hash into the Merkle tree
//! - Snapshot `(root, count)` as a checkpoint for validators to sign
//! - Keep the history of checkpointed roots so fraud can be proven
//!
//! ## Lifecycle
//!
//! ```text
//! [UNINITIALIZED] ──initialize(owner)──→ [ACTIVE] ──fail(validator manager)──→ [FAILED]
//! ```
//!
//! `fail` is reachable only through the validator manager's fraud path.
//!
//! ## Module Structure
//!
//! ```text
//! mb-03-origin-mailbox/
//! ├── domain/          # DispatchReceipt, invariants, errors
//! ├── ports/           # OriginApi (inbound)
//! ├── service.rs       # OriginMailbox
//! └── config.rs        # OriginConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use config::{OriginConfig, DEFAULT_MAX_BODY_BYTES};
pub use domain::{
    invariant_body_size, invariant_checkpointable, DispatchReceipt, OriginError, OriginResult,
};
pub use ports::OriginApi;
pub use service::OriginMailbox;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
