//! # Adapters
//!
//! In-process implementations of the outbound ports.

pub mod clock;
pub mod recipients;
pub mod verifier;

pub use clock::{ManualClock, SystemClock};
pub use recipients::InMemoryRecipients;
