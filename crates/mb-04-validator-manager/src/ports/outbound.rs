//! Driven Ports (SPI - Outbound)

use crate::domain::ValidatorResult;
use shared_types::{Address, ContractState, Domain, Hash};

/// An origin whose checkpoint history a fraud proof is checked against.
pub trait FraudTarget {
    /// Domain of the origin.
    fn local_domain(&self) -> Domain;

    /// Id bound into the origin's checkpoint digests.
    fn mailbox_id(&self) -> Hash;

    /// Lifecycle state.
    fn lifecycle(&self) -> ContractState;

    /// Index the origin recorded for `root`, if it ever checkpointed it.
    fn recorded_index(&self, root: &Hash) -> Option<u64>;

    /// Halt the origin; `caller` is the validator manager's address.
    fn halt(&self, caller: &Address) -> ValidatorResult<()>;
}
