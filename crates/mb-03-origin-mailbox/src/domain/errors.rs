//! # Domain Errors

use mb_01_merkle_accumulator::MerkleError;
use shared_types::{AccessError, Address, ContractState, Domain};
use thiserror::Error;

/// Origin mailbox errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OriginError {
    /// Operation requires the `Active` state.
    #[error("Origin not active: state is {state}")]
    NotActive {
        /// Current state
        state: ContractState,
    },

    /// Body exceeds the configured cap.
    #[error("Message body too large: {len} bytes, max {max}")]
    BodyTooLarge {
        /// Supplied body length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// `checkpoint()` on a tree with no leaves.
    #[error("Nothing to checkpoint: tree is empty")]
    EmptyTree,

    /// `fail()` called by someone other than the validator manager.
    #[error("Caller 0x{} is not the validator manager", hex_addr(.caller))]
    NotValidatorManager {
        /// Caller address
        caller: Address,
    },

    /// Lifecycle transition not allowed.
    #[error("Invalid origin transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state
        from: ContractState,
        /// Requested state
        to: ContractState,
    },

    /// Per-destination nonce space used up.
    #[error("Nonce space exhausted for destination {destination}")]
    NonceExhausted {
        /// Destination domain
        destination: Domain,
    },

    /// Tree insertion failed.
    #[error(transparent)]
    Merkle(#[from] MerkleError),

    /// Owner check failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Configuration rejected.
    #[error("Invalid origin configuration: {0}")]
    InvalidConfig(String),
}

fn hex_addr(address: &Address) -> String {
    address.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Result type for origin operations
pub type OriginResult<T> = Result<T, OriginError>;
