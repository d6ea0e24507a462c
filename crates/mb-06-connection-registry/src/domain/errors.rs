//! # Domain Errors

use mb_03_origin_mailbox::OriginError;
use shared_types::{AccessError, Address, Domain, Hash};
use thiserror::Error;

/// Registry and router errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// Zero address supplied.
    #[error("Counterpart address is zero")]
    ZeroAddress,

    /// Domain 0 is reserved.
    #[error("Domain 0 cannot be enrolled")]
    ZeroDomain,

    /// No origin mailbox configured.
    #[error("No origin mailbox set")]
    NoOrigin,

    /// No router enrolled for the domain.
    #[error("No remote router enrolled for domain {domain}")]
    NoRemoteRouter {
        /// Domain queried
        domain: Domain,
    },

    /// Delivering contract is not a registered counterpart.
    #[error("Caller is not a registered counterpart")]
    UnregisteredCounterpart {
        /// Caller address
        caller: Address,
    },

    /// Sender is not the router enrolled for its domain.
    #[error("Sender is not the enrolled router for domain {domain}")]
    UnknownSender {
        /// Origin domain
        domain: Domain,
        /// Message sender
        sender: Hash,
    },

    /// Dispatch through the origin failed.
    #[error(transparent)]
    Origin(#[from] OriginError),

    /// Owner check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}

/// Result type for registry operations
pub type ConnectionResult<T> = Result<T, ConnectionError>;
