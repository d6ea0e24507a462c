//! # MB-02 Checkpoint Signatures
//!
//! Stateless digest and signature logic shared by the destination mailbox,
//! the validator manager and the off-chain validator agent.
//!
//! **Component:** 02
//! **Architecture:** Pure domain functions + signer
//!
//! ## Digest Layout
//!
//! ```text
//! domain_hash = keccak( origin_domain:u32-BE ‖ origin_mailbox:32 ‖ protocol_tag )
//! digest      = keccak( domain_hash ‖ root:32 ‖ index:u64-BE )
//! signed      = keccak( "\x19Ethereum Signed Message:\n32" ‖ digest )   // EthSignedMessage scheme
//! ```
//!
//! The protocol tag is configuration (`"HYPERLANE"` by default, `"OPTICS"` and
//! `"ABACUS"` for the older deployments). Any change to this layout breaks
//! every deployed validator and needs a protocol version bump.
//!
//! ## Security Notes
//!
//! | Check | Failure |
//! |-------|---------|
//! | `v ∈ {0, 1, 27, 28}` | `InvalidRecoveryId` |
//! | `s < n/2` (EIP-2) | `MalleableSignature` |
//! | r, s parse as scalars | `InvalidFormat` |
//! | recovered signer == expected | `SignerMismatch` |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod signer;

// Re-exports
pub use config::{DigestScheme, SigningConfig};
pub use domain::{
    address_from_pubkey, checkpoint_digest, domain_hash, eth_signed_message_hash,
    recover_address, Checkpoint, RecoverableSignature, SignatureError, SignedCheckpoint,
    SIGNATURE_LEN,
};
pub use signer::CheckpointSigner;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
