//! # Signature Errors

use thiserror::Error;

/// Errors raised while recovering or checking a checkpoint signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Wrong length, or r / s are not valid scalars
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected 0x{}, got 0x{}", hex::encode(.expected), hex::encode(.actual))]
    SignerMismatch {
        /// Registered signer
        expected: [u8; 20],
        /// Recovered signer
        actual: [u8; 20],
    },

    /// Producing a signature failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Validator secret key could not be parsed
    #[error("Invalid secret key")]
    InvalidSecretKey,
}
