//! Destination Mailbox Service
//!
//! ## Locking
//!
//! The state lock is never held across a call out: not into the verifier and
//! not into a recipient handler. Handlers may read the mailbox while they run.

use crate::config::{AcceptanceMode, DestinationConfig};
use crate::domain::{
    truncate_return_data, AcceptedRoots, DeliveryOutcome, DestinationError, DestinationResult,
    GasMeter, HandlerError, MessageStatus, ReentrancyGuard,
};
use crate::ports::{
    CheckpointVerifier, Clock, DeliveryContext, DestinationApi, RecipientDirectory,
};
use mailbox_telemetry::{
    metric_inc, CHECKPOINTS_ACCEPTED, CHECKPOINTS_REJECTED, DELIVERIES, PROOFS,
    REENTRANCY_REJECTIONS,
};
use mb_01_merkle_accumulator::{branch_root, TREE_DEPTH};
use mb_02_checkpoint_signatures::{Checkpoint, RecoverableSignature};
use mb_04_validator_manager::ValidatorError;
use parking_lot::RwLock;
use shared_types::{
    keccak256, short_hex, Address, ContractState, Domain, EventSink, Hash, MailboxEvent, Message,
    MessageId, Ownable,
};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct DestinationState {
    lifecycle: ContractState,
    ownable: Ownable,
    roots: AcceptedRoots,
    statuses: HashMap<MessageId, MessageStatus>,
}

/// Inbound mailbox for one remote origin domain.
pub struct DestinationMailbox<R, C, E>
where
    R: RecipientDirectory,
    C: Clock,
    E: EventSink,
{
    config: DestinationConfig,
    /// Address presented to recipients as the delivering mailbox
    address: Address,
    state: RwLock<DestinationState>,
    verifier: RwLock<Arc<dyn CheckpointVerifier>>,
    recipients: Arc<R>,
    clock: Arc<C>,
    events: Arc<E>,
    guard: ReentrancyGuard,
}

impl<R, C, E> DestinationMailbox<R, C, E>
where
    R: RecipientDirectory,
    C: Clock,
    E: EventSink,
{
    /// Create an uninitialized destination.
    pub fn new(
        config: DestinationConfig,
        address: Address,
        owner: Address,
        verifier: Arc<dyn CheckpointVerifier>,
        recipients: Arc<R>,
        clock: Arc<C>,
        events: Arc<E>,
    ) -> DestinationResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            address,
            state: RwLock::new(DestinationState {
                lifecycle: ContractState::Uninitialized,
                ownable: Ownable::new(owner),
                roots: AcceptedRoots::new(),
                statuses: HashMap::new(),
            }),
            verifier: RwLock::new(verifier),
            recipients,
            clock,
            events,
            guard: ReentrancyGuard::new(),
        })
    }

    /// Owner-gated `Uninitialized → Active`.
    pub fn initialize(&self, caller: &Address) -> DestinationResult<()> {
        let mut state = self.state.write();
        state.ownable.ensure_owner(caller)?;
        transition(&mut state.lifecycle, ContractState::Active)?;
        info!(
            local_domain = self.config.local_domain,
            remote_domain = self.config.remote_domain,
            "[destination] initialized"
        );
        Ok(())
    }

    /// Halt the destination. Only the current verifier may call this.
    pub fn fail(&self, caller: &Address) -> DestinationResult<()> {
        if *caller != self.verifier.read().address() {
            return Err(DestinationError::NotValidatorManager);
        }
        transition(&mut self.state.write().lifecycle, ContractState::Failed)?;
        warn!(domain = self.config.local_domain, "[destination] halted");
        self.events.emit(MailboxEvent::Fail {
            domain: self.config.local_domain,
        });
        Ok(())
    }

    /// Owner-gated swap of the signature verifier.
    pub fn set_validator_manager(
        &self,
        caller: &Address,
        verifier: Arc<dyn CheckpointVerifier>,
    ) -> DestinationResult<()> {
        self.state.read().ownable.ensure_owner(caller)?;
        let validator_manager = verifier.address();
        *self.verifier.write() = verifier;
        info!(
            validator_manager = %short_hex(&validator_manager),
            "[destination] validator manager set"
        );
        self.events
            .emit(MailboxEvent::ValidatorManagerSet { validator_manager });
        Ok(())
    }

    /// Owner-gated ownership transfer.
    pub fn transfer_ownership(&self, caller: &Address, new_owner: Address) -> DestinationResult<()> {
        let event = self.state.write().ownable.transfer_ownership(caller, new_owner)?;
        self.events.emit(event);
        Ok(())
    }

    /// This chain's domain.
    pub fn local_domain(&self) -> Domain {
        self.config.local_domain
    }

    /// Origin domain served.
    pub fn remote_domain(&self) -> Domain {
        self.config.remote_domain
    }

    /// Address presented to recipients.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.state.read().ownable.owner()
    }

    /// Configuration in use.
    pub fn config(&self) -> &DestinationConfig {
        &self.config
    }

    fn ensure_active(&self) -> DestinationResult<()> {
        let state = self.state.read().lifecycle;
        if !state.is_active() {
            return Err(DestinationError::NotActive { state });
        }
        Ok(())
    }

    fn remote_checkpoint(&self, root: Hash, index: u64) -> Checkpoint {
        Checkpoint {
            origin_domain: self.config.remote_domain,
            origin_mailbox: self.config.remote_mailbox,
            root,
            index,
        }
    }

    /// Shared tail of both submission paths.
    fn accept_checkpoint<F>(&self, root: Hash, index: u64, verify: F) -> DestinationResult<()>
    where
        F: FnOnce(&dyn CheckpointVerifier, &Checkpoint) -> Result<(), ValidatorError>,
    {
        self.ensure_active()?;
        if let Err(e) = self.state.read().roots.ensure_newer(index) {
            metric_inc!(CHECKPOINTS_REJECTED, &["stale"]);
            debug!(index, "[destination] stale checkpoint rejected");
            return Err(e);
        }

        let checkpoint = self.remote_checkpoint(root, index);
        let verifier = Arc::clone(&*self.verifier.read());
        if let Err(e) = verify(verifier.as_ref(), &checkpoint) {
            metric_inc!(CHECKPOINTS_REJECTED, &["signature"]);
            debug!(
                root = %short_hex(&root),
                index,
                error = %e,
                "[destination] checkpoint signature rejected"
            );
            return Err(DestinationError::InvalidSignature(e));
        }

        let confirm_at = match self.config.acceptance {
            AcceptanceMode::Immediate => None,
            AcceptanceMode::Optimistic { delay_secs } => {
                Some(self.clock.now().saturating_add(delay_secs))
            }
        };
        {
            let mut state = self.state.write();
            // Re-checked under the write lock: another submission may have won.
            if !state.lifecycle.is_active() {
                return Err(DestinationError::NotActive {
                    state: state.lifecycle,
                });
            }
            if let Err(e) = state.roots.accept(root, index, confirm_at) {
                metric_inc!(CHECKPOINTS_REJECTED, &["stale"]);
                return Err(e);
            }
        }

        metric_inc!(CHECKPOINTS_ACCEPTED);
        info!(
            domain = self.config.remote_domain,
            root = %short_hex(&root),
            index,
            confirm_at = ?confirm_at,
            "[destination] checkpoint accepted"
        );
        self.events.emit(MailboxEvent::CheckpointSubmitted {
            domain: self.config.remote_domain,
            root,
            index,
            confirm_at,
        });
        Ok(())
    }

    /// Checks that need no state change: decoding, version, destination, gas.
    fn precheck(&self, message: &[u8], available_gas: u64) -> DestinationResult<Message> {
        let message = Message::from_bytes(message)?;
        message.ensure_version(self.config.message_version)?;
        if message.destination != self.config.local_domain {
            return Err(DestinationError::WrongDestination {
                expected: self.config.local_domain,
                received: message.destination,
            });
        }
        let required = self.config.required_gas();
        if available_gas < required {
            return Err(DestinationError::InsufficientGas {
                available: available_gas,
                required,
            });
        }
        Ok(message)
    }

    fn deliver(&self, message: Message, available_gas: u64) -> DestinationResult<DeliveryOutcome> {
        let message_id = message.id();
        let _token = match self.guard.enter() {
            Ok(token) => token,
            Err(e) => {
                metric_inc!(REENTRANCY_REJECTIONS);
                warn!(id = %short_hex(&message_id), "[destination] reentrant process rejected");
                return Err(e);
            }
        };

        {
            let mut state = self.state.write();
            if !state.lifecycle.is_active() {
                return Err(DestinationError::NotActive {
                    state: state.lifecycle,
                });
            }
            match state.statuses.get(&message_id).copied().unwrap_or_default() {
                MessageStatus::None => return Err(DestinationError::NotProven { message_id }),
                MessageStatus::Processed => {
                    return Err(DestinationError::AlreadyProcessed { message_id })
                }
                // Marked before the handler runs: at most one attempt.
                MessageStatus::Proven => {
                    state.statuses.insert(message_id, MessageStatus::Processed);
                }
            }
        }

        debug!(
            id = %short_hex(&message_id),
            available_gas,
            "[destination] delivering"
        );
        let mut meter = GasMeter::with_timeout(self.config.process_gas, self.config.handler_timeout());
        let result = match self.recipients.resolve(&message.recipient) {
            None => Err(HandlerError::RecipientNotFound),
            Some(recipient) => {
                let ctx = DeliveryContext {
                    mailbox: self,
                    message_id,
                    mailbox_address: self.address,
                };
                let call = catch_unwind(AssertUnwindSafe(|| {
                    recipient.handle(
                        &ctx,
                        message.origin,
                        message.sender,
                        &message.body,
                        &mut meter,
                    )
                }));
                match call {
                    Ok(Ok(data)) => meter.settle().map(|_| data),
                    Ok(Err(e)) => Err(e),
                    Err(panic) => Err(HandlerError::Panicked(panic_message(panic.as_ref()))),
                }
            }
        };

        let (success, raw, label) = match result {
            Ok(data) => (true, data, "success"),
            Err(e) => (false, e.return_data(), e.outcome_label()),
        };
        let outcome = DeliveryOutcome {
            message_id,
            success,
            return_data: truncate_return_data(raw, self.config.max_return_data_bytes),
            gas_used: meter.used(),
        };

        metric_inc!(DELIVERIES, &[label]);
        if success {
            info!(
                id = %short_hex(&message_id),
                gas_used = outcome.gas_used,
                "[destination] message processed"
            );
        } else {
            warn!(
                id = %short_hex(&message_id),
                outcome = label,
                "[destination] delivery failed, message marked processed"
            );
        }
        self.events.emit(MailboxEvent::Process {
            message_id,
            success,
            return_data: outcome.return_data.clone(),
        });
        Ok(outcome)
    }
}

impl<R, C, E> DestinationApi for DestinationMailbox<R, C, E>
where
    R: RecipientDirectory,
    C: Clock,
    E: EventSink,
{
    fn submit_checkpoint(
        &self,
        root: Hash,
        index: u64,
        signature: &RecoverableSignature,
    ) -> DestinationResult<()> {
        self.accept_checkpoint(root, index, |verifier, checkpoint| {
            verifier.verify_checkpoint(checkpoint, signature).map(|_| ())
        })
    }

    fn submit_checkpoint_with_quorum(
        &self,
        root: Hash,
        index: u64,
        signatures: &[RecoverableSignature],
    ) -> DestinationResult<()> {
        self.accept_checkpoint(root, index, |verifier, checkpoint| {
            verifier
                .verify_checkpoint_quorum(checkpoint, signatures)
                .map(|_| ())
        })
    }

    fn prove(
        &self,
        leaf: Hash,
        proof: &[Hash; TREE_DEPTH],
        index: u32,
    ) -> DestinationResult<bool> {
        let mut state = self.state.write();
        if !state.lifecycle.is_active() {
            return Err(DestinationError::NotActive {
                state: state.lifecycle,
            });
        }
        match state.statuses.get(&leaf).copied().unwrap_or_default() {
            MessageStatus::None => {}
            MessageStatus::Proven => {
                return Err(DestinationError::AlreadyProven { message_id: leaf })
            }
            MessageStatus::Processed => {
                return Err(DestinationError::AlreadyProcessed { message_id: leaf })
            }
        }

        let root = branch_root(&leaf, proof, index);
        if !state.roots.is_acceptable(&root) {
            drop(state);
            metric_inc!(PROOFS, &["rejected"]);
            debug!(
                id = %short_hex(&leaf),
                index,
                root = %short_hex(&root),
                "[destination] proof folds to unknown root"
            );
            return Ok(false);
        }
        state.statuses.insert(leaf, MessageStatus::Proven);
        drop(state);

        metric_inc!(PROOFS, &["accepted"]);
        info!(
            id = %short_hex(&leaf),
            leaf_index = index,
            root = %short_hex(&root),
            "[destination] message proven"
        );
        self.events.emit(MailboxEvent::MessageProven {
            message_id: leaf,
            leaf_index: u64::from(index),
            root,
        });
        Ok(true)
    }

    fn process(&self, message: &[u8], available_gas: u64) -> DestinationResult<DeliveryOutcome> {
        let message = self.precheck(message, available_gas)?;
        self.deliver(message, available_gas)
    }

    fn prove_and_process(
        &self,
        message: &[u8],
        proof: &[Hash; TREE_DEPTH],
        index: u32,
        available_gas: u64,
    ) -> DestinationResult<DeliveryOutcome> {
        let decoded = self.precheck(message, available_gas)?;
        // A nested call must not leave a half-done prove behind.
        if self.guard.is_entered() {
            metric_inc!(REENTRANCY_REJECTIONS);
            return Err(DestinationError::Reentrant);
        }
        let leaf = keccak256(message);
        if !self.prove(leaf, proof, index)? {
            return Err(DestinationError::UnknownRoot {
                root: branch_root(&leaf, proof, index),
            });
        }
        self.deliver(decoded, available_gas)
    }

    fn confirm(&self) -> DestinationResult<Vec<(Hash, u64)>> {
        let now = self.clock.now();
        let released = {
            let mut state = self.state.write();
            if !state.lifecycle.is_active() {
                return Err(DestinationError::NotActive {
                    state: state.lifecycle,
                });
            }
            state.roots.confirm(now)
        };
        for (root, index) in &released {
            info!(root = %short_hex(root), index, "[destination] checkpoint confirmed");
            self.events.emit(MailboxEvent::CheckpointConfirmed {
                root: *root,
                index: *index,
            });
        }
        Ok(released)
    }

    fn message_status(&self, message_id: &MessageId) -> MessageStatus {
        self.state
            .read()
            .statuses
            .get(message_id)
            .copied()
            .unwrap_or_default()
    }

    fn latest_checkpoint(&self) -> Option<(Hash, u64)> {
        self.state.read().roots.latest()
    }

    fn latest_confirmed_checkpoint(&self) -> Option<(Hash, u64)> {
        self.state.read().roots.latest_confirmed()
    }

    fn checkpoint_index(&self, root: &Hash) -> Option<u64> {
        self.state.read().roots.get(root).map(|entry| entry.index)
    }

    fn confirm_at(&self, root: &Hash) -> Option<u64> {
        self.state
            .read()
            .roots
            .get(root)
            .and_then(|entry| entry.confirm_at)
    }

    fn is_acceptable_root(&self, root: &Hash) -> bool {
        self.state.read().roots.is_acceptable(root)
    }

    fn state(&self) -> ContractState {
        self.state.read().lifecycle
    }
}

fn transition(current: &mut ContractState, next: ContractState) -> DestinationResult<()> {
    if !current.can_transition_to(next) {
        return Err(DestinationError::InvalidTransition {
            from: *current,
            to: next,
        });
    }
    *current = next;
    Ok(())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
