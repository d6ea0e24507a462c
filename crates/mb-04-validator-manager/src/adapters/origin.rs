//! [`FraudTarget`] for the in-process origin mailbox.

use crate::domain::{ValidatorError, ValidatorResult};
use crate::ports::FraudTarget;
use mb_03_origin_mailbox::{OriginApi, OriginMailbox};
use shared_types::{Address, ContractState, Domain, EventSink, Hash};

impl<E: EventSink> FraudTarget for OriginMailbox<E> {
    fn local_domain(&self) -> Domain {
        OriginMailbox::local_domain(self)
    }

    fn mailbox_id(&self) -> Hash {
        OriginMailbox::mailbox_id(self)
    }

    fn lifecycle(&self) -> ContractState {
        OriginApi::state(self)
    }

    fn recorded_index(&self, root: &Hash) -> Option<u64> {
        self.cached_checkpoint_index(root)
    }

    fn halt(&self, caller: &Address) -> ValidatorResult<()> {
        self.fail(caller)
            .map_err(|e| ValidatorError::HaltRejected(e.to_string()))
    }
}
