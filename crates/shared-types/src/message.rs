//! # Message Wire Format
//!
//! ```text
//! ┌─────────┬───────────┬────────────┬───────────┬─────────────────┬──────────────┬──────┐
//! │ version │ nonce     │ origin     │ sender    │ destination     │ recipient    │ body │
//! │ u8      │ u32 BE    │ u32 BE     │ 32 bytes  │ u32 BE          │ 32 bytes     │ ...  │
//! └─────────┴───────────┴────────────┴───────────┴─────────────────┴──────────────┴──────┘
//! ```
//!
//! The keccak-256 of these bytes is the Merkle leaf and the message id. The
//! layout is bit-exact: changing it requires a new `MESSAGE_VERSION`.

use crate::entities::{keccak256, Domain, Hash, MessageId};
use crate::errors::MessageError;
use serde::{Deserialize, Serialize};

/// Version byte written by this implementation.
pub const MESSAGE_VERSION: u8 = 0;

/// Length of the fixed-width header preceding the body.
pub const MESSAGE_HEADER_LEN: usize = 1 + 4 + 4 + 32 + 4 + 32;

/// A cross-chain message. Immutable once formatted; identity is its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Wire format version
    pub version: u8,
    /// Per-destination sequence number assigned by the origin
    pub nonce: u32,
    /// Domain the message was dispatched from
    pub origin: Domain,
    /// Sender id on the origin domain
    pub sender: Hash,
    /// Domain the message is addressed to
    pub destination: Domain,
    /// Recipient id on the destination domain
    pub recipient: Hash,
    /// Opaque application payload
    pub body: Vec<u8>,
}

impl Message {
    /// Canonical byte encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MESSAGE_HEADER_LEN + self.body.len());
        out.push(self.version);
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.extend_from_slice(&self.origin.to_be_bytes());
        out.extend_from_slice(&self.sender);
        out.extend_from_slice(&self.destination.to_be_bytes());
        out.extend_from_slice(&self.recipient);
        out.extend_from_slice(&self.body);
        out
    }

    /// Decode canonical bytes. Everything after the header is the body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageError> {
        if bytes.len() < MESSAGE_HEADER_LEN {
            return Err(MessageError::TooShort {
                len: bytes.len(),
                required: MESSAGE_HEADER_LEN,
            });
        }

        let u32_at = |offset: usize| {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&bytes[offset..offset + 4]);
            u32::from_be_bytes(buf)
        };
        let hash_at = |offset: usize| {
            let mut buf = [0u8; 32];
            buf.copy_from_slice(&bytes[offset..offset + 32]);
            buf
        };

        Ok(Self {
            version: bytes[0],
            nonce: u32_at(1),
            origin: u32_at(5),
            sender: hash_at(9),
            destination: u32_at(41),
            recipient: hash_at(45),
            body: bytes[MESSAGE_HEADER_LEN..].to_vec(),
        })
    }

    /// keccak-256 of the canonical encoding.
    pub fn id(&self) -> MessageId {
        keccak256(&self.to_bytes())
    }

    /// `destination << 32 | nonce`, the packed index carried by Dispatch events.
    pub fn destination_and_nonce(&self) -> u64 {
        (u64::from(self.destination) << 32) | u64::from(self.nonce)
    }

    /// Reject messages whose version differs from `supported`.
    pub fn ensure_version(&self, supported: u8) -> Result<(), MessageError> {
        if self.version != supported {
            return Err(MessageError::UnsupportedVersion {
                received: self.version,
                supported,
            });
        }
        Ok(())
    }
}
