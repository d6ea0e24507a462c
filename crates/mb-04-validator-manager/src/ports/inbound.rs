//! Driving Ports (API - Inbound)

use crate::domain::ValidatorResult;
use mb_02_checkpoint_signatures::{Checkpoint, RecoverableSignature};
use shared_types::Address;

/// Read-only registry surface consumed during checkpoint acceptance.
pub trait ValidatorRegistry: Send + Sync {
    /// Recover the signer and require it to be enrolled for
    /// `checkpoint.origin_domain`.
    fn verify_signature(
        &self,
        checkpoint: &Checkpoint,
        signature: &RecoverableSignature,
    ) -> ValidatorResult<Address>;

    /// Recover every signer and require a threshold of enrolled ones.
    ///
    /// Returns the number of enrolled signers counted.
    fn verify_quorum(
        &self,
        checkpoint: &Checkpoint,
        signatures: &[RecoverableSignature],
    ) -> ValidatorResult<usize>;

    /// `verify_signature(..).is_ok()`.
    fn is_validator_signature(
        &self,
        checkpoint: &Checkpoint,
        signature: &RecoverableSignature,
    ) -> bool {
        self.verify_signature(checkpoint, signature).is_ok()
    }

    /// `verify_quorum(..).is_ok()`.
    fn is_quorum(&self, checkpoint: &Checkpoint, signatures: &[RecoverableSignature]) -> bool {
        self.verify_quorum(checkpoint, signatures).is_ok()
    }
}
