//! # Destination Configuration
//!
//! Delivery budget constants follow the historical deployments: 850,000 gas
//! for the recipient call plus 15,000 reserved for bookkeeping.

use crate::domain::DestinationError;
use serde::{Deserialize, Serialize};
use shared_types::{Domain, Hash, MESSAGE_VERSION};
use std::time::Duration;

/// Gas handed to the recipient handler.
pub const DEFAULT_PROCESS_GAS: u64 = 850_000;

/// Gas kept back so bookkeeping completes after the handler.
pub const DEFAULT_RESERVE_GAS: u64 = 15_000;

/// Bytes of handler return data kept.
pub const DEFAULT_MAX_RETURN_DATA: usize = 256;

/// How checkpoints become usable for proofs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptanceMode {
    /// Usable as soon as the signature verifies.
    #[default]
    Immediate,
    /// Usable after `delay_secs` and an explicit `confirm()`, leaving a
    /// window for fraud proofs.
    Optimistic {
        /// Seconds between submission and earliest confirmation
        delay_secs: u64,
    },
}

/// Destination mailbox configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// This chain's domain
    pub local_domain: Domain,
    /// Origin domain whose checkpoints are accepted
    pub remote_domain: Domain,
    /// Origin mailbox id bound into checkpoint digests
    pub remote_mailbox: Hash,
    /// Gas handed to the handler
    pub process_gas: u64,
    /// Gas reserved for bookkeeping
    pub reserve_gas: u64,
    /// Return data cap
    pub max_return_data_bytes: usize,
    /// Wall-clock cap on a handler call, milliseconds
    pub handler_timeout_ms: u64,
    /// Checkpoint acceptance profile
    pub acceptance: AcceptanceMode,
    /// Supported message version
    pub message_version: u8,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            local_domain: 0,
            remote_domain: 0,
            remote_mailbox: [0u8; 32],
            process_gas: DEFAULT_PROCESS_GAS,
            reserve_gas: DEFAULT_RESERVE_GAS,
            max_return_data_bytes: DEFAULT_MAX_RETURN_DATA,
            handler_timeout_ms: 5_000,
            acceptance: AcceptanceMode::Immediate,
            message_version: MESSAGE_VERSION,
        }
    }
}

impl DestinationConfig {
    /// Destination on `local_domain` accepting checkpoints from
    /// `remote_domain`'s mailbox.
    pub fn new(local_domain: Domain, remote_domain: Domain, remote_mailbox: Hash) -> Self {
        Self {
            local_domain,
            remote_domain,
            remote_mailbox,
            ..Self::default()
        }
    }

    /// Domains 1000 → 2000, matching `OriginConfig::for_testing`.
    pub fn for_testing() -> Self {
        Self::new(2000, 1000, [0x0A; 32])
    }

    /// Switch to the optimistic profile.
    pub fn with_optimistic_delay(mut self, delay_secs: u64) -> Self {
        self.acceptance = AcceptanceMode::Optimistic { delay_secs };
        self
    }

    /// `process_gas + reserve_gas`.
    pub fn required_gas(&self) -> u64 {
        self.process_gas.saturating_add(self.reserve_gas)
    }

    /// Handler deadline.
    pub fn handler_timeout(&self) -> Duration {
        Duration::from_millis(self.handler_timeout_ms)
    }

    /// Reject unusable settings.
    pub fn validate(&self) -> Result<(), DestinationError> {
        if self.local_domain == self.remote_domain {
            return Err(DestinationError::InvalidConfig(
                "local and remote domain must differ".to_string(),
            ));
        }
        if self.process_gas == 0 {
            return Err(DestinationError::InvalidConfig(
                "process_gas must be positive".to_string(),
            ));
        }
        if self.handler_timeout_ms == 0 {
            return Err(DestinationError::InvalidConfig(
                "handler_timeout_ms must be positive".to_string(),
            ));
        }
        if let AcceptanceMode::Optimistic { delay_secs: 0 } = self.acceptance {
            return Err(DestinationError::InvalidConfig(
                "optimistic delay must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
