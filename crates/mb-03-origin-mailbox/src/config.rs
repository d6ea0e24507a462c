//! # Origin Configuration

use crate::domain::OriginError;
use serde::{Deserialize, Serialize};
use shared_types::{Domain, Hash, MESSAGE_VERSION};

/// Historical cap on message bodies.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024;

/// Origin mailbox configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginConfig {
    /// Domain this mailbox dispatches from
    pub local_domain: Domain,
    /// Id of this mailbox, bound into checkpoint digests
    pub mailbox_id: Hash,
    /// Largest accepted body
    pub max_body_bytes: usize,
    /// Version byte written into every message
    pub message_version: u8,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            local_domain: 0,
            mailbox_id: [0u8; 32],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            message_version: MESSAGE_VERSION,
        }
    }
}

impl OriginConfig {
    /// Configuration for a domain with default limits.
    pub fn new(local_domain: Domain, mailbox_id: Hash) -> Self {
        Self {
            local_domain,
            mailbox_id,
            ..Self::default()
        }
    }

    /// Small body cap so size limits are easy to hit in tests.
    pub fn for_testing() -> Self {
        Self {
            local_domain: 1000,
            mailbox_id: [0x0A; 32],
            max_body_bytes: 64,
            message_version: MESSAGE_VERSION,
        }
    }

    /// Reject unusable settings.
    pub fn validate(&self) -> Result<(), OriginError> {
        if self.max_body_bytes == 0 {
            return Err(OriginError::InvalidConfig(
                "max_body_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
