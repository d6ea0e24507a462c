//! # Checkpoint
//!
//! A checkpoint is a claim `(root, index)` about one origin mailbox's tree.
//! It becomes state only when a destination accepts it, or when the fraud
//! path compares it against the origin's own history.

use super::digest::{checkpoint_digest, domain_hash, prehash};
use super::ecdsa::{recover_address, RecoverableSignature};
use super::errors::SignatureError;
use crate::config::SigningConfig;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Domain, Hash};

/// Snapshot claim of an origin tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Domain of the origin mailbox
    pub origin_domain: Domain,
    /// Id of the origin mailbox (zero when unbound)
    pub origin_mailbox: Hash,
    /// Tree root
    pub root: Hash,
    /// Leaf count when the root was taken
    pub index: u64,
}

impl Checkpoint {
    /// Domain separator for this checkpoint's origin.
    pub fn domain_hash(&self, config: &SigningConfig) -> Hash {
        domain_hash(self.origin_domain, &self.origin_mailbox, &config.protocol_tag)
    }

    /// Checkpoint digest before any signing prefix.
    pub fn digest(&self, config: &SigningConfig) -> Hash {
        checkpoint_digest(&self.domain_hash(config), &self.root, self.index)
    }

    /// Exact 32 bytes validators sign.
    pub fn signing_hash(&self, config: &SigningConfig) -> Hash {
        prehash(&self.digest(config), config)
    }

    /// Address that produced `signature` over this checkpoint.
    pub fn recover_signer(
        &self,
        signature: &RecoverableSignature,
        config: &SigningConfig,
    ) -> Result<Address, SignatureError> {
        recover_address(&self.signing_hash(config), signature)
    }

    /// Fail unless `expected` signed this checkpoint.
    pub fn verify_signer(
        &self,
        signature: &RecoverableSignature,
        expected: &Address,
        config: &SigningConfig,
    ) -> Result<(), SignatureError> {
        let actual = self.recover_signer(signature, config)?;
        if actual != *expected {
            return Err(SignatureError::SignerMismatch {
                expected: *expected,
                actual,
            });
        }
        Ok(())
    }
}

/// A checkpoint plus one validator signature, as relayed between chains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCheckpoint {
    /// The claim
    pub checkpoint: Checkpoint,
    /// Validator signature over [`Checkpoint::signing_hash`]
    pub signature: RecoverableSignature,
}

impl SignedCheckpoint {
    /// Recover the signer.
    pub fn recover(&self, config: &SigningConfig) -> Result<Address, SignatureError> {
        self.checkpoint.recover_signer(&self.signature, config)
    }
}
