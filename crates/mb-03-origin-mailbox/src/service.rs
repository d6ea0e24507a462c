//! Origin Mailbox Service
//!
//! Owns the Merkle tree and the per-destination nonces. All tree mutation
//! happens under a single write lock so leaf indices follow insertion order.

use crate::config::OriginConfig;
use crate::domain::{
    invariant_body_size, invariant_checkpointable, DispatchReceipt, OriginError, OriginResult,
};
use crate::ports::OriginApi;
use mailbox_telemetry::{metric_inc, CHECKPOINTS_CACHED, FRAUD_HALTS, MESSAGES_DISPATCHED};
use mb_01_merkle_accumulator::IncrementalMerkle;
use mb_02_checkpoint_signatures::Checkpoint;
use parking_lot::RwLock;
use shared_types::{
    address_to_id, short_hex, Address, ContractState, Domain, EventSink, Hash, MailboxEvent,
    Message, Ownable,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mutable origin state.
struct OriginState {
    lifecycle: ContractState,
    tree: IncrementalMerkle,
    /// Next nonce per destination domain
    nonces: HashMap<Domain, u32>,
    latest_checkpoint: Option<Checkpoint>,
    /// root -> index recorded when the root was checkpointed
    cached_checkpoints: HashMap<Hash, u64>,
    ownable: Ownable,
    validator_manager: Address,
}

/// Outbound mailbox.
pub struct OriginMailbox<E: EventSink> {
    config: OriginConfig,
    state: RwLock<OriginState>,
    events: Arc<E>,
}

impl<E: EventSink> OriginMailbox<E> {
    /// Create an uninitialized origin.
    pub fn new(
        config: OriginConfig,
        owner: Address,
        validator_manager: Address,
        events: Arc<E>,
    ) -> OriginResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: RwLock::new(OriginState {
                lifecycle: ContractState::Uninitialized,
                tree: IncrementalMerkle::new(),
                nonces: HashMap::new(),
                latest_checkpoint: None,
                cached_checkpoints: HashMap::new(),
                ownable: Ownable::new(owner),
                validator_manager,
            }),
            events,
        })
    }

    /// Owner-gated `Uninitialized → Active`.
    pub fn initialize(&self, caller: &Address) -> OriginResult<()> {
        let mut state = self.state.write();
        state.ownable.ensure_owner(caller)?;
        transition(&mut state.lifecycle, ContractState::Active)?;
        info!(domain = self.config.local_domain, "[origin] initialized");
        Ok(())
    }

    /// Halt the origin. Only the validator manager may call this, after
    /// proving fraud.
    pub fn fail(&self, caller: &Address) -> OriginResult<()> {
        {
            let mut state = self.state.write();
            if *caller != state.validator_manager {
                debug!(caller = %short_hex(caller), "[origin] fail rejected: not validator manager");
                return Err(OriginError::NotValidatorManager { caller: *caller });
            }
            transition(&mut state.lifecycle, ContractState::Failed)?;
        }
        metric_inc!(FRAUD_HALTS);
        warn!(domain = self.config.local_domain, "[origin] halted after fraud proof");
        self.events.emit(MailboxEvent::Fail {
            domain: self.config.local_domain,
        });
        Ok(())
    }

    /// Owner-gated change of the address allowed to call `fail`.
    pub fn set_validator_manager(
        &self,
        caller: &Address,
        validator_manager: Address,
    ) -> OriginResult<()> {
        {
            let mut state = self.state.write();
            state.ownable.ensure_owner(caller)?;
            state.validator_manager = validator_manager;
        }
        info!(
            validator_manager = %short_hex(&validator_manager),
            "[origin] validator manager set"
        );
        self.events
            .emit(MailboxEvent::ValidatorManagerSet { validator_manager });
        Ok(())
    }

    /// Owner-gated ownership transfer.
    pub fn transfer_ownership(&self, caller: &Address, new_owner: Address) -> OriginResult<()> {
        let event = self.state.write().ownable.transfer_ownership(caller, new_owner)?;
        self.events.emit(event);
        Ok(())
    }

    /// `(root, index)` of the latest checkpoint.
    pub fn latest_cached_checkpoint(&self) -> Option<(Hash, u64)> {
        self.state
            .read()
            .latest_checkpoint
            .map(|cp| (cp.root, cp.index))
    }

    /// Next nonce that will be assigned for `destination`.
    pub fn nonce(&self, destination: Domain) -> u32 {
        self.state
            .read()
            .nonces
            .get(&destination)
            .copied()
            .unwrap_or(0)
    }

    /// Domain messages are dispatched from.
    pub fn local_domain(&self) -> Domain {
        self.config.local_domain
    }

    /// Id bound into this origin's checkpoint digests.
    pub fn mailbox_id(&self) -> Hash {
        self.config.mailbox_id
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.state.read().ownable.owner()
    }

    /// Address allowed to halt this origin.
    pub fn validator_manager(&self) -> Address {
        self.state.read().validator_manager
    }
}

impl<E: EventSink> OriginApi for OriginMailbox<E> {
    fn dispatch(
        &self,
        caller: &Address,
        destination: Domain,
        recipient: Hash,
        body: &[u8],
    ) -> OriginResult<DispatchReceipt> {
        let receipt = {
            let mut state = self.state.write();
            if !state.lifecycle.is_active() {
                return Err(OriginError::NotActive {
                    state: state.lifecycle,
                });
            }
            invariant_body_size(body.len(), self.config.max_body_bytes)?;

            let nonce = state.nonces.get(&destination).copied().unwrap_or(0);
            let next = nonce
                .checked_add(1)
                .ok_or(OriginError::NonceExhausted { destination })?;

            let message = Message {
                version: self.config.message_version,
                nonce,
                origin: self.config.local_domain,
                sender: address_to_id(caller),
                destination,
                recipient,
                body: body.to_vec(),
            };
            let message_id = message.id();

            // Tree first: a full tree must not consume a nonce.
            let leaf_index = state.tree.insert(message_id)?;
            state.nonces.insert(destination, next);
            debug_assert_eq!(u64::from(leaf_index), state.tree.count() - 1);

            DispatchReceipt {
                message_id,
                leaf_index,
                message,
            }
        };

        metric_inc!(MESSAGES_DISPATCHED);
        info!(
            destination,
            nonce = receipt.message.nonce,
            leaf_index = receipt.leaf_index,
            id = %short_hex(&receipt.message_id),
            "[origin] message dispatched"
        );
        self.events.emit(MailboxEvent::Dispatch {
            message_id: receipt.message_id,
            leaf_index: u64::from(receipt.leaf_index),
            destination_and_nonce: receipt.destination_and_nonce(),
            message: receipt.message.to_bytes(),
        });
        Ok(receipt)
    }

    fn checkpoint(&self) -> OriginResult<Checkpoint> {
        let checkpoint = {
            let mut state = self.state.write();
            invariant_checkpointable(state.lifecycle, state.tree.count())?;
            let checkpoint = Checkpoint {
                origin_domain: self.config.local_domain,
                origin_mailbox: self.config.mailbox_id,
                root: state.tree.root(),
                index: state.tree.count(),
            };
            state
                .cached_checkpoints
                .insert(checkpoint.root, checkpoint.index);
            state.latest_checkpoint = Some(checkpoint);
            checkpoint
        };

        metric_inc!(CHECKPOINTS_CACHED);
        info!(
            root = %short_hex(&checkpoint.root),
            index = checkpoint.index,
            "[origin] checkpoint cached"
        );
        self.events.emit(MailboxEvent::CheckpointCached {
            root: checkpoint.root,
            index: checkpoint.index,
        });
        Ok(checkpoint)
    }

    fn latest_checkpoint(&self) -> Option<Checkpoint> {
        self.state.read().latest_checkpoint
    }

    fn cached_checkpoint_index(&self, root: &Hash) -> Option<u64> {
        self.state.read().cached_checkpoints.get(root).copied()
    }

    fn state(&self) -> ContractState {
        self.state.read().lifecycle
    }

    fn count(&self) -> u64 {
        self.state.read().tree.count()
    }

    fn root(&self) -> Hash {
        self.state.read().tree.root()
    }
}

fn transition(current: &mut ContractState, next: ContractState) -> OriginResult<()> {
    if !current.can_transition_to(next) {
        return Err(OriginError::InvalidTransition {
            from: *current,
            to: next,
        });
    }
    *current = next;
    Ok(())
}
