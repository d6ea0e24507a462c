//! # Ports
//!
//! - Inbound: [`DestinationApi`]
//! - Outbound: [`CheckpointVerifier`], [`MessageRecipient`], [`RecipientDirectory`], [`Clock`]

pub mod inbound;
pub mod outbound;

pub use inbound::DestinationApi;
pub use outbound::{CheckpointVerifier, Clock, DeliveryContext, MessageRecipient, RecipientDirectory};
