//! # Error Types
//!
//! Errors shared by every mailbox component.

use crate::entities::Address;
use thiserror::Error;

/// Errors raised while decoding or validating a [`Message`](crate::Message).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Input shorter than the fixed-width header.
    #[error("Message too short: {len} bytes, header needs {required}")]
    TooShort {
        /// Bytes supplied
        len: usize,
        /// Minimum header length
        required: usize,
    },

    /// Message version not supported by this mailbox.
    #[error("Unsupported message version: received {received}, supported {supported}")]
    UnsupportedVersion {
        /// Version byte found in the message
        received: u8,
        /// Version this mailbox speaks
        supported: u8,
    },
}

/// Errors raised by owner-gated administrative operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The caller is not the configured owner.
    #[error("Caller 0x{} is not the owner 0x{}", hex::encode(.caller), hex::encode(.owner))]
    NotOwner {
        /// Address that attempted the call
        caller: Address,
        /// Current owner
        owner: Address,
    },

    /// Ownership cannot be handed to the zero address.
    #[error("New owner is the zero address")]
    ZeroAddress,
}
