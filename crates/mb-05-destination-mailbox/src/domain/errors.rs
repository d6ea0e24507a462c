//! # Error Types
//!
//! `DestinationError` is what callers of the mailbox see. `HandlerError` is
//! what a recipient handler returns; it never escapes `process`, it is folded
//! into the delivery outcome.

use mb_04_validator_manager::ValidatorError;
use shared_types::{AccessError, ContractState, Domain, Hash, MessageError, MessageId};
use thiserror::Error;

/// Destination mailbox errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DestinationError {
    /// Operation requires the `Active` state.
    #[error("Destination not active: state is {state}")]
    NotActive {
        /// Current state
        state: ContractState,
    },

    /// Lifecycle transition not allowed.
    #[error("Invalid destination transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state
        from: ContractState,
        /// Requested state
        to: ContractState,
    },

    /// Checkpoint index not newer than the latest accepted one.
    #[error("Stale checkpoint: index {index} <= latest {latest}")]
    StaleCheckpoint {
        /// Submitted index
        index: u64,
        /// Latest accepted index
        latest: u64,
    },

    /// Signature check failed.
    #[error("Invalid checkpoint signature: {0}")]
    InvalidSignature(#[from] ValidatorError),

    /// `prove_and_process` proof folded to a root that is not usable.
    #[error("Proof does not match any accepted root")]
    UnknownRoot {
        /// Root the proof folded to
        root: Hash,
    },

    /// `prove` on a message that already left `None`.
    #[error("Message already proven")]
    AlreadyProven {
        /// Message id
        message_id: MessageId,
    },

    /// `process` on a message that was never proven.
    #[error("Message not proven")]
    NotProven {
        /// Message id
        message_id: MessageId,
    },

    /// `process` on a message that was already delivered.
    #[error("Message already processed")]
    AlreadyProcessed {
        /// Message id
        message_id: MessageId,
    },

    /// Message addressed to another domain.
    #[error("Wrong destination: expected {expected}, got {received}")]
    WrongDestination {
        /// Local domain
        expected: Domain,
        /// Domain in the message
        received: Domain,
    },

    /// Caller did not provide enough gas for delivery plus bookkeeping.
    #[error("Insufficient gas: {available} < {required}")]
    InsufficientGas {
        /// Gas offered
        available: u64,
        /// `process_gas + reserve_gas`
        required: u64,
    },

    /// A `process` call is already running on this instance.
    #[error("Reentrant process call rejected")]
    Reentrant,

    /// Message bytes could not be decoded.
    #[error(transparent)]
    Message(#[from] MessageError),

    /// Owner check failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// `fail` called by someone other than the validator manager.
    #[error("Caller is not the validator manager")]
    NotValidatorManager,

    /// Configuration rejected.
    #[error("Invalid destination configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for destination operations
pub type DestinationResult<T> = Result<T, DestinationError>;

/// Failures of a single recipient handler call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The handler charged more gas than it was given.
    #[error("out of gas: limit {limit}")]
    OutOfGas {
        /// Budget handed to the handler
        limit: u64,
    },

    /// The handler ran past its wall-clock deadline.
    #[error("handler timeout: {elapsed_ms}ms > {max_ms}ms")]
    Timeout {
        /// Time spent
        elapsed_ms: u64,
        /// Allowed time
        max_ms: u64,
    },

    /// The handler rejected the message with revert data.
    #[error("reverted")]
    Reverted(Vec<u8>),

    /// Rejected by the application layer (router authentication and the like).
    #[error("rejected: {0}")]
    Rejected(String),

    /// The handler panicked.
    #[error("panicked: {0}")]
    Panicked(String),

    /// No handler registered for the recipient id.
    #[error("recipient not found")]
    RecipientNotFound,
}

impl HandlerError {
    /// Bytes recorded as the failed attempt's return data.
    pub fn return_data(&self) -> Vec<u8> {
        match self {
            Self::Reverted(data) => data.clone(),
            other => other.to_string().into_bytes(),
        }
    }

    /// Label used for the deliveries metric.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            Self::OutOfGas { .. } => "out_of_gas",
            Self::Timeout { .. } => "timeout",
            Self::Reverted(_) | Self::Rejected(_) => "reverted",
            Self::Panicked(_) => "panicked",
            Self::RecipientNotFound => "no_recipient",
        }
    }
}
