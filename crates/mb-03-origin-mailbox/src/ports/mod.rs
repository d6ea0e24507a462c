//! # Ports
//!
//! The origin has no outbound dependencies besides its event sink.

pub mod inbound;

pub use inbound::OriginApi;
