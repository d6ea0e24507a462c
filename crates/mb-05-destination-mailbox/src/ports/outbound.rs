//! Driven Ports (SPI - Outbound)
//!
//! What the destination needs from the outside: a signature verifier, a
//! directory of recipient handlers and a clock.

use crate::domain::{GasMeter, HandlerError};
use crate::ports::inbound::DestinationApi;
use mb_02_checkpoint_signatures::{Checkpoint, RecoverableSignature};
use mb_04_validator_manager::ValidatorError;
use shared_types::{Address, Domain, Hash, MessageId};
use std::sync::Arc;

/// Checks checkpoint signatures against the origin domain's validator set.
pub trait CheckpointVerifier: Send + Sync {
    /// Identity of the verifier; the only caller allowed to halt the destination.
    fn address(&self) -> Address;

    /// Single enrolled signer.
    fn verify_checkpoint(
        &self,
        checkpoint: &Checkpoint,
        signature: &RecoverableSignature,
    ) -> Result<Address, ValidatorError>;

    /// Threshold of enrolled signers, ascending order.
    fn verify_checkpoint_quorum(
        &self,
        checkpoint: &Checkpoint,
        signatures: &[RecoverableSignature],
    ) -> Result<usize, ValidatorError>;
}

/// What a handler can see about the delivery it is running in.
pub struct DeliveryContext<'a> {
    /// The delivering mailbox; calls back into it are allowed, nested
    /// `process` is rejected.
    pub mailbox: &'a dyn DestinationApi,
    /// Id of the message being delivered
    pub message_id: MessageId,
    /// Address the mailbox presents to recipients
    pub mailbox_address: Address,
}

/// Application contract receiving messages.
pub trait MessageRecipient: Send + Sync {
    /// Handle one message. Charge `meter` for the work done.
    fn handle(
        &self,
        ctx: &DeliveryContext<'_>,
        origin: Domain,
        sender: Hash,
        body: &[u8],
        meter: &mut GasMeter,
    ) -> Result<Vec<u8>, HandlerError>;
}

/// Resolves recipient ids to handlers.
pub trait RecipientDirectory: Send + Sync {
    /// Handler registered for `recipient`.
    fn resolve(&self, recipient: &Hash) -> Option<Arc<dyn MessageRecipient>>;
}

/// Unix time source for the optimistic profile.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> u64;
}
