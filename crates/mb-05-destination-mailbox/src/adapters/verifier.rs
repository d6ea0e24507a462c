//! [`CheckpointVerifier`] backed by the in-process validator manager.

use crate::ports::CheckpointVerifier;
use mb_02_checkpoint_signatures::{Checkpoint, RecoverableSignature};
use mb_04_validator_manager::{ValidatorError, ValidatorManager, ValidatorRegistry};
use shared_types::{Address, EventSink};

impl<E: EventSink> CheckpointVerifier for ValidatorManager<E> {
    fn address(&self) -> Address {
        ValidatorManager::address(self)
    }

    fn verify_checkpoint(
        &self,
        checkpoint: &Checkpoint,
        signature: &RecoverableSignature,
    ) -> Result<Address, ValidatorError> {
        self.verify_signature(checkpoint, signature)
    }

    fn verify_checkpoint_quorum(
        &self,
        checkpoint: &Checkpoint,
        signatures: &[RecoverableSignature],
    ) -> Result<usize, ValidatorError> {
        self.verify_quorum(checkpoint, signatures)
    }
}
