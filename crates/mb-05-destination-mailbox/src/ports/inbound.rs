//! Driving Ports (API - Inbound)

use crate::domain::{DeliveryOutcome, DestinationResult, MessageStatus};
use mb_01_merkle_accumulator::TREE_DEPTH;
use mb_02_checkpoint_signatures::RecoverableSignature;
use shared_types::{ContractState, Hash, MessageId};

/// Primary destination mailbox API. Object safe so recipients can call back
/// through a `&dyn DestinationApi`.
pub trait DestinationApi: Send + Sync {
    /// Accept a checkpoint signed by one enrolled validator.
    ///
    /// `index` must be strictly greater than the latest accepted index.
    fn submit_checkpoint(
        &self,
        root: Hash,
        index: u64,
        signature: &RecoverableSignature,
    ) -> DestinationResult<()>;

    /// Accept a checkpoint signed by a threshold of enrolled validators.
    fn submit_checkpoint_with_quorum(
        &self,
        root: Hash,
        index: u64,
        signatures: &[RecoverableSignature],
    ) -> DestinationResult<()>;

    /// Mark `leaf` proven if its branch folds to a usable root.
    ///
    /// Returns `Ok(false)` for an unrecognized root so the caller can retry
    /// with a corrected proof.
    fn prove(&self, leaf: Hash, proof: &[Hash; TREE_DEPTH], index: u32)
        -> DestinationResult<bool>;

    /// Deliver a proven message exactly once.
    fn process(&self, message: &[u8], available_gas: u64) -> DestinationResult<DeliveryOutcome>;

    /// `prove` then `process`; an unrecognized root is an error here.
    fn prove_and_process(
        &self,
        message: &[u8],
        proof: &[Hash; TREE_DEPTH],
        index: u32,
        available_gas: u64,
    ) -> DestinationResult<DeliveryOutcome>;

    /// Release optimistic roots whose delay has elapsed, oldest first.
    fn confirm(&self) -> DestinationResult<Vec<(Hash, u64)>>;

    /// Status of a message.
    fn message_status(&self, message_id: &MessageId) -> MessageStatus;

    /// Latest submitted `(root, index)`.
    ///
    /// Under the optimistic profile this root may still be pending and
    /// refused by `prove`; see [`DestinationApi::latest_confirmed_checkpoint`].
    fn latest_checkpoint(&self) -> Option<(Hash, u64)>;

    /// Latest `(root, index)` usable for proofs.
    fn latest_confirmed_checkpoint(&self) -> Option<(Hash, u64)>;

    /// Index accepted for `root`.
    fn checkpoint_index(&self, root: &Hash) -> Option<u64>;

    /// Confirmation time for an optimistic root.
    fn confirm_at(&self, root: &Hash) -> Option<u64>;

    /// Usable for proofs.
    fn is_acceptable_root(&self, root: &Hash) -> bool;

    /// Lifecycle state.
    fn state(&self) -> ContractState;
}
