//! # Domain Module
//!
//! Checkpoint claims, digests and ECDSA recovery.

pub mod checkpoint;
pub mod digest;
pub mod ecdsa;
pub mod errors;

pub use checkpoint::{Checkpoint, SignedCheckpoint};
pub use digest::{checkpoint_digest, domain_hash, eth_signed_message_hash};
pub use ecdsa::{address_from_pubkey, recover_address, RecoverableSignature, SIGNATURE_LEN};
pub use errors::*;
