//! Delivery outcome.

use serde::{Deserialize, Serialize};
use shared_types::MessageId;

/// Result of one delivery attempt. The message is `Processed` either way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// Message id
    pub message_id: MessageId,
    /// Whether the handler returned successfully
    pub success: bool,
    /// Return or error data, truncated
    pub return_data: Vec<u8>,
    /// Gas the handler charged
    pub gas_used: u64,
}

/// Keep at most `max` leading bytes.
pub fn truncate_return_data(mut data: Vec<u8>, max: usize) -> Vec<u8> {
    data.truncate(max);
    data
}
