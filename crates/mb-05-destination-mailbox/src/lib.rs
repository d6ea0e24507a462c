//! # MB-05 Destination Mailbox
//!
//! Inbound side of the protocol ("Replica" / "Inbox").
//!
//! **Component:** 05
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Message Lifecycle
//!
//! ```text
//! submit_checkpoint(root, index, sig) ── root accepted (immediately, or after confirm())
//!            │
//! prove(leaf, proof, index) ── branch_root(..) ∈ accepted roots ──→ [PROVEN]
//!            │
//! process(message, gas) ── guard entered, marked [PROCESSED], handler called
//! ```
//!
//! ## Delivery Guarantees
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | At most once | status set to `Processed` before the handler runs |
//! | Bounded cost | `GasMeter` with `process_gas` and a wall-clock deadline |
//! | Failure isolation | handler errors and panics become a failed `DeliveryOutcome` |
//! | No nested delivery | per-instance `ReentrancyGuard` |
//! | Observability | return data truncated to `max_return_data_bytes` |
//!
//! Proofs remain valid against every root ever accepted, not only the latest.
//!
//! ## Acceptance Profiles
//!
//! `AcceptanceMode::Immediate` (default) makes roots usable as soon as the
//! signature verifies. `AcceptanceMode::Optimistic` holds them for a delay
//! and requires `confirm()`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryRecipients, ManualClock, SystemClock};
pub use config::{
    AcceptanceMode, DestinationConfig, DEFAULT_MAX_RETURN_DATA, DEFAULT_PROCESS_GAS,
    DEFAULT_RESERVE_GAS,
};
pub use domain::{
    AcceptedRoot, AcceptedRoots, DeliveryOutcome, DestinationError, DestinationResult, GasMeter,
    HandlerError, MessageStatus, ReentrancyGuard,
};
pub use ports::{
    CheckpointVerifier, Clock, DeliveryContext, DestinationApi, MessageRecipient,
    RecipientDirectory,
};
pub use service::DestinationMailbox;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
