//! # Ports
//!
//! - Inbound: [`ValidatorRegistry`], the predicate surface destinations consume
//! - Outbound: [`FraudTarget`], the origin a fraud proof is checked against

pub mod inbound;
pub mod outbound;

pub use inbound::ValidatorRegistry;
pub use outbound::FraudTarget;
