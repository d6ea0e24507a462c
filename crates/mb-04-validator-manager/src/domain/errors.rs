//! # Domain Errors

use mb_02_checkpoint_signatures::SignatureError;
use shared_types::{AccessError, Address, ContractState, Domain, Hash};
use thiserror::Error;

/// Validator manager errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// No validators enrolled for the domain.
    #[error("No validators enrolled for domain {domain}")]
    NoValidators {
        /// Domain queried
        domain: Domain,
    },

    /// Recovered signer is not in the domain's set.
    #[error("Signer is not an enrolled validator for domain {domain}")]
    NotEnrolled {
        /// Domain queried
        domain: Domain,
        /// Recovered signer
        signer: Address,
    },

    /// Validator already in the set.
    #[error("Validator already enrolled for domain {domain}")]
    AlreadyEnrolled {
        /// Domain
        domain: Domain,
        /// Validator
        validator: Address,
    },

    /// Removing the validator would leave fewer validators than the threshold.
    #[error("Cannot drop below threshold: {validators} validators, threshold {threshold}")]
    BelowThreshold {
        /// Validators remaining after removal
        validators: usize,
        /// Current threshold
        threshold: usize,
    },

    /// Threshold outside `1..=validators`.
    #[error("Invalid threshold {threshold}: must be between 1 and {validators}")]
    InvalidThreshold {
        /// Requested threshold
        threshold: usize,
        /// Enrolled validators
        validators: usize,
    },

    /// Fewer enrolled signers than the threshold.
    #[error("Quorum not reached: {signers} enrolled signers, threshold {threshold}")]
    QuorumNotReached {
        /// Enrolled signers counted
        signers: usize,
        /// Required threshold
        threshold: usize,
    },

    /// Quorum signatures not in strictly ascending signer order.
    #[error("Signers must be sorted in strictly ascending order")]
    UnsortedSigners,

    /// The validator address is zero.
    #[error("Validator address is zero")]
    ZeroValidator,

    /// The checkpoint matches origin history; nothing to prove.
    #[error("Checkpoint (index {index}) matches origin history; not improper")]
    ProperCheckpoint {
        /// Root
        root: Hash,
        /// Claimed and recorded index
        index: u64,
    },

    /// The origin is not in a state that can be halted.
    #[error("Origin not active: state is {state}")]
    OriginNotActive {
        /// Origin state
        state: ContractState,
    },

    /// The origin refused to halt.
    #[error("Origin refused to halt: {0}")]
    HaltRejected(String),

    /// Signature could not be parsed or recovered.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Owner check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}

/// Result type for validator manager operations
pub type ValidatorResult<T> = Result<T, ValidatorError>;
