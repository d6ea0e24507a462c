//! # MB-06 Connection Registry
//!
//! Tells applications which local contracts are trusted to deliver messages
//! from which remote domain, and provides a router that authenticates
//! deliveries against it.
//!
//! **Component:** 06
//!
//! ## Mappings
//!
//! ```text
//! counterpart (local address) ──domain_of──→ remote domain
//! remote domain ──counterpart_for──→ counterpart
//! ```
//!
//! Both directions are kept consistent: re-enrolling a counterpart drops its
//! previous domain first, and enrolling over an occupied domain evicts the
//! previous occupant.
//!
//! ## Router
//!
//! A [`Router`] accepts a delivery only when the delivering mailbox is a
//! registered counterpart and the message sender is the router enrolled for
//! the origin domain.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod router;
pub mod service;

// Re-exports
pub use domain::{ConnectionError, ConnectionMap, ConnectionResult};
pub use ports::RouterHandler;
pub use router::Router;
pub use service::ConnectionRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
