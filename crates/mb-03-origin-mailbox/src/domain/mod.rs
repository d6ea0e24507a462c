//! # Domain Module
//!
//! Dispatch receipts, invariants and errors for the origin mailbox.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
