//! Driving Ports (API - Inbound)

use crate::domain::{DispatchReceipt, OriginResult};
use mb_02_checkpoint_signatures::Checkpoint;
use shared_types::{Address, ContractState, Domain, Hash};

/// Primary origin mailbox API.
///
/// Every mutation takes the caller explicitly.
pub trait OriginApi: Send + Sync {
    /// Format and commit an outbound message.
    ///
    /// The returned `leaf_index` equals `count() - 1` at the time of insertion.
    fn dispatch(
        &self,
        caller: &Address,
        destination: Domain,
        recipient: Hash,
        body: &[u8],
    ) -> OriginResult<DispatchReceipt>;

    /// Snapshot `(root, count)` as the latest checkpoint. Permissionless.
    fn checkpoint(&self) -> OriginResult<Checkpoint>;

    /// Latest snapshot, if any.
    fn latest_checkpoint(&self) -> Option<Checkpoint>;

    /// Index recorded the last time `root` was checkpointed.
    fn cached_checkpoint_index(&self, root: &Hash) -> Option<u64>;

    /// Lifecycle state.
    fn state(&self) -> ContractState;

    /// Number of dispatched messages.
    fn count(&self) -> u64;

    /// Current tree root.
    fn root(&self) -> Hash;
}
