//! # Checkpoint Signer
//!
//! The validator side: reads the origin's latest checkpoint and signs it in
//! exactly the layout the verifiers recover against.

use crate::config::SigningConfig;
use crate::domain::{
    address_from_pubkey, Checkpoint, RecoverableSignature, SignatureError, SignedCheckpoint,
};
use k256::ecdsa::{RecoveryId, SigningKey};
use shared_types::{short_hex, Address, Hash};
use tracing::debug;
use zeroize::Zeroizing;

/// secp256k1 validator key with its derived address.
#[derive(Clone)]
pub struct CheckpointSigner {
    key: SigningKey,
    address: Address,
}

impl std::fmt::Debug for CheckpointSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckpointSigner")
            .field("address", &short_hex(&self.address))
            .finish_non_exhaustive()
    }
}

impl CheckpointSigner {
    /// Wrap an existing key.
    pub fn new(key: SigningKey) -> Self {
        let address = address_from_pubkey(key.verifying_key());
        Self { key, address }
    }

    /// Fresh random key.
    pub fn random() -> Self {
        Self::new(SigningKey::random(&mut rand::thread_rng()))
    }

    /// Load from a 32-byte secret.
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, SignatureError> {
        let key = SigningKey::from_slice(secret).map_err(|_| SignatureError::InvalidSecretKey)?;
        Ok(Self::new(key))
    }

    /// Load from a hex secret, with or without `0x`. The decoded buffer is
    /// wiped on drop.
    pub fn from_hex(secret: &str) -> Result<Self, SignatureError> {
        let trimmed = secret.trim().trim_start_matches("0x");
        let bytes =
            Zeroizing::new(hex::decode(trimmed).map_err(|_| SignatureError::InvalidSecretKey)?);
        let key = SigningKey::from_slice(&bytes).map_err(|_| SignatureError::InvalidSecretKey)?;
        Ok(Self::new(key))
    }

    /// Validator address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a prehash. Output is always low-s with `v ∈ {27, 28}`.
    pub fn sign_prehash(&self, prehash: &Hash) -> Result<RecoverableSignature, SignatureError> {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(prehash)
            .map_err(|e| SignatureError::SigningFailed(e.to_string()))?;

        let (sig, recid) = match sig.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced()),
            ),
            None => (sig, recid),
        };

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(RecoverableSignature::from_parts(&r, &s, recid.to_byte() + 27))
    }

    /// Sign a checkpoint.
    pub fn sign_checkpoint(
        &self,
        checkpoint: &Checkpoint,
        config: &SigningConfig,
    ) -> Result<SignedCheckpoint, SignatureError> {
        let signature = self.sign_prehash(&checkpoint.signing_hash(config))?;
        debug!(
            validator = %short_hex(&self.address),
            domain = checkpoint.origin_domain,
            root = %short_hex(&checkpoint.root),
            index = checkpoint.index,
            "[signer] checkpoint signed"
        );
        Ok(SignedCheckpoint {
            checkpoint: *checkpoint,
            signature,
        })
    }
}
