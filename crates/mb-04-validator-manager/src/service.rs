//! Validator Manager Service

use crate::domain::{FraudReport, ValidatorError, ValidatorResult, ValidatorSet};
use crate::ports::{FraudTarget, ValidatorRegistry};
use mailbox_telemetry::log_event;
use mb_02_checkpoint_signatures::{Checkpoint, RecoverableSignature, SigningConfig};
use parking_lot::RwLock;
use shared_types::{short_hex, Address, Domain, EventSink, Hash, MailboxEvent, Ownable};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

struct RegistryState {
    ownable: Ownable,
    sets: HashMap<Domain, ValidatorSet>,
}

/// Owner-administered validator registry with the fraud-proof entry point.
pub struct ValidatorManager<E: EventSink> {
    /// Identity presented to origins when halting them
    address: Address,
    signing: SigningConfig,
    state: RwLock<RegistryState>,
    events: Arc<E>,
}

impl<E: EventSink> ValidatorManager<E> {
    /// Create an empty registry.
    pub fn new(address: Address, owner: Address, signing: SigningConfig, events: Arc<E>) -> Self {
        Self {
            address,
            signing,
            state: RwLock::new(RegistryState {
                ownable: Ownable::new(owner),
                sets: HashMap::new(),
            }),
            events,
        }
    }

    /// Replace `domain`'s set with `validator` alone, threshold 1.
    pub fn set_validator(
        &self,
        caller: &Address,
        domain: Domain,
        validator: Address,
    ) -> ValidatorResult<()> {
        let replaced = {
            let mut state = self.state.write();
            state.ownable.ensure_owner(caller)?;
            let set = ValidatorSet::single(validator)?;
            state
                .sets
                .insert(domain, set)
                .map(|old| old.validators())
                .unwrap_or_default()
        };

        info!(domain, validator = %short_hex(&validator), "[validators] validator set");
        for old in replaced.into_iter().filter(|v| *v != validator) {
            self.events.emit(MailboxEvent::ValidatorUnenrolled {
                domain,
                validator: old,
            });
        }
        self.events
            .emit(MailboxEvent::ValidatorEnrolled { domain, validator });
        self.events
            .emit(MailboxEvent::ThresholdSet { domain, threshold: 1 });
        Ok(())
    }

    /// Add a validator to `domain`'s set.
    pub fn enroll_validator(
        &self,
        caller: &Address,
        domain: Domain,
        validator: Address,
    ) -> ValidatorResult<()> {
        {
            let mut state = self.state.write();
            state.ownable.ensure_owner(caller)?;
            state.sets.entry(domain).or_default().enroll(domain, validator)?;
        }
        info!(domain, validator = %short_hex(&validator), "[validators] validator enrolled");
        self.events
            .emit(MailboxEvent::ValidatorEnrolled { domain, validator });
        Ok(())
    }

    /// Remove a validator from `domain`'s set.
    pub fn unenroll_validator(
        &self,
        caller: &Address,
        domain: Domain,
        validator: Address,
    ) -> ValidatorResult<()> {
        {
            let mut state = self.state.write();
            state.ownable.ensure_owner(caller)?;
            let set = state
                .sets
                .get_mut(&domain)
                .ok_or(ValidatorError::NoValidators { domain })?;
            set.unenroll(domain, &validator)?;
        }
        info!(domain, validator = %short_hex(&validator), "[validators] validator unenrolled");
        self.events
            .emit(MailboxEvent::ValidatorUnenrolled { domain, validator });
        Ok(())
    }

    /// Set the number of signatures `domain` needs for a quorum.
    pub fn set_threshold(
        &self,
        caller: &Address,
        domain: Domain,
        threshold: usize,
    ) -> ValidatorResult<()> {
        {
            let mut state = self.state.write();
            state.ownable.ensure_owner(caller)?;
            let set = state
                .sets
                .get_mut(&domain)
                .ok_or(ValidatorError::NoValidators { domain })?;
            set.set_threshold(threshold)?;
        }
        info!(domain, threshold, "[validators] threshold set");
        self.events
            .emit(MailboxEvent::ThresholdSet { domain, threshold });
        Ok(())
    }

    /// Owner-gated ownership transfer.
    pub fn transfer_ownership(&self, caller: &Address, new_owner: Address) -> ValidatorResult<()> {
        let event = self.state.write().ownable.transfer_ownership(caller, new_owner)?;
        self.events.emit(event);
        Ok(())
    }

    /// Prove that `origin` was checkpointed improperly and halt it.
    ///
    /// Permissionless. Succeeds iff `signatures` reach the quorum of the
    /// origin's domain and the origin's recorded index for `root` differs from
    /// `index` (a root the origin never checkpointed counts as differing).
    /// A single-validator domain has threshold 1, so one signature suffices.
    pub fn improper_checkpoint<T: FraudTarget + ?Sized>(
        &self,
        origin: &T,
        root: Hash,
        index: u64,
        signatures: &[RecoverableSignature],
    ) -> ValidatorResult<FraudReport> {
        let checkpoint = Checkpoint {
            origin_domain: origin.local_domain(),
            origin_mailbox: origin.mailbox_id(),
            root,
            index,
        };
        let signers = self.quorum_signers(&checkpoint, signatures)?;

        let state = origin.lifecycle();
        if !state.is_active() {
            return Err(ValidatorError::OriginNotActive { state });
        }

        let recorded_index = origin.recorded_index(&root);
        if recorded_index == Some(index) {
            debug!(
                root = %short_hex(&root),
                index,
                "[validators] checkpoint matches origin history"
            );
            return Err(ValidatorError::ProperCheckpoint { root, index });
        }

        origin.halt(&self.address)?;

        log_event!(
            warn,
            "validators",
            "[validators] improper checkpoint proven, origin halted",
            domain = checkpoint.origin_domain,
            root = %short_hex(&root),
            claimed_index = index,
            recorded_index = ?recorded_index,
            signers = signers.len()
        );
        self.events.emit(MailboxEvent::ImproperCheckpoint {
            origin_domain: checkpoint.origin_domain,
            root,
            claimed_index: index,
            recorded_index,
            signers: signers.clone(),
        });
        Ok(FraudReport {
            origin_domain: checkpoint.origin_domain,
            root,
            claimed_index: index,
            recorded_index,
            signers,
        })
    }

    /// Recover `signatures` and return the enrolled signers, failing below
    /// the domain's threshold.
    fn quorum_signers(
        &self,
        checkpoint: &Checkpoint,
        signatures: &[RecoverableSignature],
    ) -> ValidatorResult<Vec<Address>> {
        let signers = signatures
            .iter()
            .map(|sig| checkpoint.recover_signer(sig, &self.signing))
            .collect::<Result<Vec<_>, _>>()?;

        let state = self.state.read();
        let domain = checkpoint.origin_domain;
        let set = state
            .sets
            .get(&domain)
            .filter(|set| !set.is_empty())
            .ok_or(ValidatorError::NoValidators { domain })?;
        let counted = set.count_enrolled(&signers)?;
        if counted < set.threshold() {
            debug!(
                domain,
                counted,
                threshold = set.threshold(),
                "[validators] quorum not reached"
            );
            return Err(ValidatorError::QuorumNotReached {
                signers: counted,
                threshold: set.threshold(),
            });
        }
        Ok(signers.into_iter().filter(|s| set.contains(s)).collect())
    }

    /// Enrolled validators for `domain`, ascending.
    pub fn validators(&self, domain: Domain) -> Vec<Address> {
        self.state
            .read()
            .sets
            .get(&domain)
            .map(ValidatorSet::validators)
            .unwrap_or_default()
    }

    /// Quorum threshold for `domain`, 0 if none enrolled.
    pub fn threshold(&self, domain: Domain) -> usize {
        self.state
            .read()
            .sets
            .get(&domain)
            .map(ValidatorSet::threshold)
            .unwrap_or(0)
    }

    /// Address this manager presents to origins.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.state.read().ownable.owner()
    }

    /// Digest parameters used for recovery.
    pub fn signing_config(&self) -> &SigningConfig {
        &self.signing
    }
}

impl<E: EventSink> ValidatorRegistry for ValidatorManager<E> {
    fn verify_signature(
        &self,
        checkpoint: &Checkpoint,
        signature: &RecoverableSignature,
    ) -> ValidatorResult<Address> {
        let signer = checkpoint.recover_signer(signature, &self.signing)?;
        let state = self.state.read();
        let domain = checkpoint.origin_domain;
        let set = state
            .sets
            .get(&domain)
            .filter(|set| !set.is_empty())
            .ok_or(ValidatorError::NoValidators { domain })?;
        if !set.contains(&signer) {
            debug!(domain, signer = %short_hex(&signer), "[validators] signer not enrolled");
            return Err(ValidatorError::NotEnrolled { domain, signer });
        }
        Ok(signer)
    }

    fn verify_quorum(
        &self,
        checkpoint: &Checkpoint,
        signatures: &[RecoverableSignature],
    ) -> ValidatorResult<usize> {
        self.quorum_signers(checkpoint, signatures)
            .map(|signers| signers.len())
    }
}
