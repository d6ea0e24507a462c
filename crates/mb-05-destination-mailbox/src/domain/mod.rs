//! # Domain Module
//!
//! - `status`: per-message `None → Proven → Processed`
//! - `accepted_roots`: checkpoint table with the optimistic confirmation queue
//! - `gas`: budget handed to recipient handlers
//! - `delivery`: outcome of a delivery attempt
//! - `guard`: per-instance reentrancy flag

pub mod accepted_roots;
pub mod delivery;
pub mod errors;
pub mod gas;
pub mod guard;
pub mod status;

pub use accepted_roots::{AcceptedRoot, AcceptedRoots};
pub use delivery::{truncate_return_data, DeliveryOutcome};
pub use errors::*;
pub use gas::GasMeter;
pub use guard::{GuardToken, ReentrancyGuard};
pub use status::MessageStatus;
