//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Message, MessageId};

/// What `dispatch` hands back to the sender. Mirrors the Dispatch event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReceipt {
    /// Message id (the inserted leaf)
    pub message_id: MessageId,
    /// Leaf position, `count - 1` right after insertion
    pub leaf_index: u32,
    /// The formatted message
    pub message: Message,
}

impl DispatchReceipt {
    /// `destination << 32 | nonce`.
    pub fn destination_and_nonce(&self) -> u64 {
        self.message.destination_and_nonce()
    }
}
