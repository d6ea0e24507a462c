//! # Integration Test Flows
//!
//! Cross-crate behaviour beyond the happy path:
//!
//! 1. **Validator Manager → Origin**: fraud proofs halt the origin only when
//!    the signed claim contradicts its checkpoint history
//! 2. **Destination → Recipient → Destination**: nested delivery is refused
//! 3. **Optimistic profile**: roots are unusable until confirmed
//! 4. **Quorum**: multi-validator checkpoints and rotation
//! 5. **Connection Registry → Router**: authenticated application delivery

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use mailbox_telemetry::REENTRANCY_REJECTIONS;
    use mb_01_merkle_accumulator::TREE_DEPTH;
    use mb_02_checkpoint_signatures::{CheckpointSigner, RecoverableSignature};
    use mb_03_origin_mailbox::{OriginApi, OriginError};
    use mb_04_validator_manager::ValidatorError;
    use mb_05_destination_mailbox::{
        DeliveryContext, DeliveryOutcome, DestinationApi, DestinationConfig, DestinationError,
        DestinationResult, GasMeter, HandlerError, MessageRecipient, MessageStatus,
    };
    use mb_06_connection_registry::{ConnectionRegistry, Router, RouterHandler};
    use parking_lot::RwLock;
    use shared_types::{address_to_id, Address, ContractState, Domain, Hash, MailboxEvent};
    use std::sync::Arc;

    // =============================================================================
    // FRAUD PROOFS
    // =============================================================================

    #[test]
    fn test_fraud_on_unrecorded_root_halts_origin() {
        let mut net = Network::new();
        net.dispatch(b"a");
        net.checkpoint();

        let forged_root = [0xF0; 32];
        let sig = net.sign(forged_root, 1);
        let report = net
            .manager
            .improper_checkpoint(&net.origin, forged_root, 1, &[sig])
            .unwrap();

        assert_eq!(report.origin_domain, ORIGIN_DOMAIN);
        assert_eq!(report.recorded_index, None);
        assert_eq!(report.signers, vec![net.validator.address()]);
        assert_eq!(net.origin.state(), ContractState::Failed);
        assert_eq!(net.origin_events.named("Fail").len(), 1);
        assert_eq!(net.events.named("ImproperCheckpoint").len(), 1);

        assert!(matches!(
            net.origin
                .dispatch(&SENDER, DESTINATION_DOMAIN, [0; 32], b"after"),
            Err(OriginError::NotActive { .. })
        ));
    }

    #[test]
    fn test_fraud_on_wrong_index_halts_origin() {
        let mut net = Network::new();
        net.dispatch(b"a");
        net.dispatch(b"b");
        let checkpoint = net.checkpoint();

        let sig = net.sign(checkpoint.root, 7);
        let report = net
            .manager
            .improper_checkpoint(&net.origin, checkpoint.root, 7, &[sig])
            .unwrap();
        assert_eq!(report.claimed_index, 7);
        assert_eq!(report.recorded_index, Some(2));
        assert_eq!(net.origin.state(), ContractState::Failed);
    }

    #[test]
    fn test_proper_checkpoint_is_not_fraud() {
        let mut net = Network::new();
        net.dispatch(b"a");
        let checkpoint = net.checkpoint();

        let sig = net.sign(checkpoint.root, checkpoint.index);
        assert_eq!(
            net.manager
                .improper_checkpoint(&net.origin, checkpoint.root, checkpoint.index, &[sig]),
            Err(ValidatorError::ProperCheckpoint {
                root: checkpoint.root,
                index: checkpoint.index
            })
        );
        assert_eq!(net.origin.state(), ContractState::Active);
        assert!(net.events.named("ImproperCheckpoint").is_empty());
    }

    #[test]
    fn test_fraud_needs_enrolled_signer() {
        let mut net = Network::new();
        net.dispatch(b"a");

        let outsider = CheckpointSigner::random();
        let sig = net.sign_with(&outsider, [0xF0; 32], 1);
        assert!(matches!(
            net.manager
                .improper_checkpoint(&net.origin, [0xF0; 32], 1, &[sig]),
            Err(ValidatorError::QuorumNotReached { signers: 0, .. })
        ));
        assert_eq!(net.origin.state(), ContractState::Active);
    }

    #[test]
    fn test_halted_origin_cannot_be_halted_again() {
        let mut net = Network::new();
        net.dispatch(b"a");
        let sig = net.sign([0xF0; 32], 1);
        net.manager
            .improper_checkpoint(&net.origin, [0xF0; 32], 1, &[sig])
            .unwrap();
        assert_eq!(
            net.manager
                .improper_checkpoint(&net.origin, [0xF0; 32], 1, &[sig]),
            Err(ValidatorError::OriginNotActive {
                state: ContractState::Failed
            })
        );
        assert_eq!(net.origin_events.named("Fail").len(), 1);
    }

    #[test]
    fn test_fraud_rejected_when_origin_trusts_another_manager() {
        let mut net = Network::new();
        net.dispatch(b"a");
        net.origin
            .set_validator_manager(&OWNER, [0x44; 20])
            .unwrap();

        let sig = net.sign([0xF0; 32], 1);
        assert!(matches!(
            net.manager
                .improper_checkpoint(&net.origin, [0xF0; 32], 1, &[sig]),
            Err(ValidatorError::HaltRejected(_))
        ));
        assert_eq!(net.origin.state(), ContractState::Active);
    }

    // =============================================================================
    // REENTRANCY
    // =============================================================================

    const REENTRANT: Address = [0x0B; 20];

    /// Tries to deliver another message from inside its own delivery.
    struct Reentrant {
        nested: Vec<u8>,
        nested_proof: Option<([Hash; TREE_DEPTH], u32)>,
        outcome: RwLock<Option<DestinationResult<DeliveryOutcome>>>,
    }

    impl MessageRecipient for Reentrant {
        fn handle(
            &self,
            ctx: &DeliveryContext<'_>,
            _origin: Domain,
            _sender: Hash,
            _body: &[u8],
            meter: &mut GasMeter,
        ) -> Result<Vec<u8>, HandlerError> {
            meter.charge(1_000)?;
            let result = match &self.nested_proof {
                Some((proof, index)) => ctx.mailbox.prove_and_process(&self.nested, proof, *index, GAS),
                None => ctx.mailbox.process(&self.nested, GAS),
            };
            *self.outcome.write() = Some(result);
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_nested_process_rejected() {
        let mut net = Network::new();
        let victim = net.dispatch(b"victim");
        let reentrant = Arc::new(Reentrant {
            nested: victim.message.to_bytes(),
            nested_proof: None,
            outcome: RwLock::new(None),
        });
        net.recipients
            .register_address(&REENTRANT, reentrant.clone());
        let attacker = net.dispatch_to(address_to_id(&REENTRANT), b"attack");
        net.relay_checkpoint();
        assert!(net.prove(&victim, 2));
        assert!(net.prove(&attacker, 2));

        let outcome = net
            .destination
            .process(&attacker.message.to_bytes(), GAS)
            .unwrap();
        assert!(outcome.success);
        assert_eq!(
            *reentrant.outcome.read(),
            Some(Err(DestinationError::Reentrant))
        );
        assert!(REENTRANCY_REJECTIONS.get() >= 1.0);

        // The nested attempt left the victim untouched.
        assert_eq!(
            net.destination.message_status(&victim.message_id),
            MessageStatus::Proven
        );
        assert!(net
            .destination
            .process(&victim.message.to_bytes(), GAS)
            .unwrap()
            .success);
    }

    #[test]
    fn test_nested_prove_and_process_leaves_no_partial_proof() {
        let mut net = Network::new();
        let victim = net.dispatch(b"victim");
        let proof = net.proof(victim.leaf_index, 1);
        let reentrant = Arc::new(Reentrant {
            nested: victim.message.to_bytes(),
            nested_proof: Some((proof, victim.leaf_index)),
            outcome: RwLock::new(None),
        });
        net.recipients
            .register_address(&REENTRANT, reentrant.clone());
        let attacker = net.dispatch_to(address_to_id(&REENTRANT), b"attack");
        net.relay_checkpoint();
        assert!(net.prove(&attacker, 2));

        net.destination
            .process(&attacker.message.to_bytes(), GAS)
            .unwrap();
        assert_eq!(
            *reentrant.outcome.read(),
            Some(Err(DestinationError::Reentrant))
        );
        assert_eq!(
            net.destination.message_status(&victim.message_id),
            MessageStatus::None
        );
    }

    // =============================================================================
    // OPTIMISTIC PROFILE
    // =============================================================================

    fn optimistic_network() -> Network {
        Network::with_config(
            DestinationConfig::new(DESTINATION_DOMAIN, ORIGIN_DOMAIN, ORIGIN_MAILBOX_ID)
                .with_optimistic_delay(600),
        )
    }

    #[test]
    fn test_optimistic_root_waits_for_confirmation() {
        let mut net = optimistic_network();
        let receipt = net.dispatch(b"slow");
        let checkpoint = net.relay_checkpoint();

        assert_eq!(
            net.destination.confirm_at(&checkpoint.root),
            Some(GENESIS_TIME + 600)
        );
        assert!(!net.destination.is_acceptable_root(&checkpoint.root));
        assert!(!net.prove(&receipt, 1));

        net.clock.advance_time(599);
        assert!(net.destination.confirm().unwrap().is_empty());
        assert!(!net.prove(&receipt, 1));

        net.clock.advance_time(1);
        assert_eq!(
            net.destination.confirm().unwrap(),
            vec![(checkpoint.root, 1)]
        );
        assert!(net.prove(&receipt, 1));
        assert!(net
            .destination
            .process(&receipt.message.to_bytes(), GAS)
            .unwrap()
            .success);
        assert_eq!(net.events.named("CheckpointConfirmed").len(), 1);
    }

    #[test]
    fn test_optimistic_index_still_monotonic() {
        let mut net = optimistic_network();
        net.dispatch(b"a");
        net.dispatch(b"b");
        let checkpoint = net.relay_checkpoint();
        assert!(matches!(
            net.destination
                .submit_checkpoint(checkpoint.root, 2, &net.sign(checkpoint.root, 2)),
            Err(DestinationError::StaleCheckpoint { .. })
        ));
    }

    // =============================================================================
    // QUORUM
    // =============================================================================

    fn sorted_signatures(
        net: &Network,
        signers: &[&CheckpointSigner],
        root: Hash,
        index: u64,
    ) -> Vec<RecoverableSignature> {
        let mut signers = signers.to_vec();
        signers.sort_by_key(|s| s.address());
        signers
            .iter()
            .map(|s| net.sign_with(s, root, index))
            .collect()
    }

    #[test]
    fn test_quorum_checkpoint() {
        let mut net = Network::new();
        let second = CheckpointSigner::random();
        net.manager
            .enroll_validator(&OWNER, ORIGIN_DOMAIN, second.address())
            .unwrap();
        net.manager
            .set_threshold(&OWNER, ORIGIN_DOMAIN, 2)
            .unwrap();

        let receipt = net.dispatch(b"q");
        let checkpoint = net.checkpoint();
        let (root, index) = (checkpoint.root, checkpoint.index);

        let single = vec![net.sign(root, index)];
        assert!(matches!(
            net.destination.submit_checkpoint_with_quorum(root, index, &single),
            Err(DestinationError::InvalidSignature(
                ValidatorError::QuorumNotReached { .. }
            ))
        ));

        let mut sigs = sorted_signatures(&net, &[&net.validator, &second], root, index);
        sigs.reverse();
        assert!(matches!(
            net.destination.submit_checkpoint_with_quorum(root, index, &sigs),
            Err(DestinationError::InvalidSignature(
                ValidatorError::UnsortedSigners
            ))
        ));

        sigs.reverse();
        net.destination
            .submit_checkpoint_with_quorum(root, index, &sigs)
            .unwrap();
        assert!(net.prove(&receipt, 1));
    }

    #[test]
    fn test_rotated_validator_loses_authority() {
        let mut net = Network::new();
        net.dispatch(b"a");
        let old = net.checkpoint();

        let replacement = CheckpointSigner::random();
        net.manager
            .set_validator(&OWNER, ORIGIN_DOMAIN, replacement.address())
            .unwrap();
        assert_eq!(
            net.manager.validators(ORIGIN_DOMAIN),
            vec![replacement.address()]
        );
        assert!(net
            .destination
            .submit_checkpoint(old.root, old.index, &net.sign(old.root, old.index))
            .is_err());
        net.destination
            .submit_checkpoint(
                old.root,
                old.index,
                &net.sign_with(&replacement, old.root, old.index),
            )
            .unwrap();
        assert_eq!(net.events.named("ValidatorUnenrolled").len(), 1);
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[test]
    fn test_halted_destination_refuses_everything() {
        let mut net = Network::new();
        let receipt = net.dispatch(b"a");
        net.relay_checkpoint();
        assert!(net.prove(&receipt, 1));

        assert_eq!(
            net.destination.fail(&OWNER),
            Err(DestinationError::NotValidatorManager)
        );
        net.destination.fail(&MANAGER).unwrap();
        assert_eq!(net.destination.state(), ContractState::Failed);

        assert!(matches!(
            net.destination.process(&receipt.message.to_bytes(), GAS),
            Err(DestinationError::NotActive { .. })
        ));
        net.dispatch(b"b");
        let checkpoint = net.checkpoint();
        assert!(matches!(
            net.destination.submit_checkpoint(
                checkpoint.root,
                checkpoint.index,
                &net.sign(checkpoint.root, checkpoint.index)
            ),
            Err(DestinationError::NotActive { .. })
        ));
    }

    // =============================================================================
    // ROUTER VIA CONNECTION REGISTRY
    // =============================================================================

    const ORIGIN_ROUTER: Address = [0x0C; 20];
    const DESTINATION_ROUTER: Address = [0x0D; 20];

    #[derive(Clone, Default)]
    struct Inbox(Arc<RwLock<Vec<(Domain, Vec<u8>)>>>);

    impl RouterHandler for Inbox {
        fn handle_message(
            &self,
            origin: Domain,
            _sender: Hash,
            body: &[u8],
            meter: &mut GasMeter,
        ) -> Result<Vec<u8>, HandlerError> {
            meter.charge(2_000)?;
            self.0.write().push((origin, body.to_vec()));
            Ok(b"ack".to_vec())
        }
    }

    struct Routers {
        net: Network,
        registry: Arc<ConnectionRegistry<shared_types::RecordingEventSink>>,
        origin_router: Router<Inbox, shared_types::RecordingEventSink>,
        inbox: Inbox,
    }

    fn create_routers() -> Routers {
        let net = Network::new();

        let origin_registry = Arc::new(ConnectionRegistry::new(
            OWNER,
            Arc::clone(&net.origin_events),
        ));
        let origin_router = Router::new(
            ORIGIN_ROUTER,
            OWNER,
            origin_registry,
            Inbox::default(),
            Arc::clone(&net.origin_events),
        );
        origin_router
            .enroll_remote_router(&OWNER, DESTINATION_DOMAIN, address_to_id(&DESTINATION_ROUTER))
            .unwrap();

        let registry = Arc::new(ConnectionRegistry::new(OWNER, Arc::clone(&net.events)));
        registry
            .enroll_counterpart(&OWNER, DESTINATION_MAILBOX, ORIGIN_DOMAIN)
            .unwrap();
        let inbox = Inbox::default();
        let destination_router = Arc::new(Router::new(
            DESTINATION_ROUTER,
            OWNER,
            Arc::clone(&registry),
            inbox.clone(),
            Arc::clone(&net.events),
        ));
        destination_router
            .enroll_remote_router(&OWNER, ORIGIN_DOMAIN, address_to_id(&ORIGIN_ROUTER))
            .unwrap();
        net.recipients
            .register_address(&DESTINATION_ROUTER, destination_router);

        Routers {
            net,
            registry,
            origin_router,
            inbox,
        }
    }

    #[test]
    fn test_router_roundtrip() {
        let Routers {
            mut net,
            origin_router,
            inbox,
            ..
        } = create_routers();

        let receipt = origin_router
            .dispatch(&net.origin, DESTINATION_DOMAIN, b"ping")
            .unwrap();
        net.observe(&receipt);
        net.relay_checkpoint();
        assert!(net.prove(&receipt, 1));

        let outcome = net
            .destination
            .process(&receipt.message.to_bytes(), GAS)
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.return_data, b"ack");
        assert_eq!(*inbox.0.read(), vec![(ORIGIN_DOMAIN, b"ping".to_vec())]);
    }

    #[test]
    fn test_router_rejects_unknown_sender() {
        let Routers { mut net, inbox, .. } = create_routers();

        let receipt = net.dispatch_to(address_to_id(&DESTINATION_ROUTER), b"spoof");
        net.relay_checkpoint();
        assert!(net.prove(&receipt, 1));

        let outcome = net
            .destination
            .process(&receipt.message.to_bytes(), GAS)
            .unwrap();
        assert!(!outcome.success);
        assert!(inbox.0.read().is_empty());
        assert_eq!(
            net.destination.message_status(&receipt.message_id),
            MessageStatus::Processed
        );
    }

    #[test]
    fn test_router_rejects_unregistered_mailbox() {
        let Routers {
            mut net,
            registry,
            origin_router,
            inbox,
        } = create_routers();
        registry
            .unenroll_counterpart(&OWNER, DESTINATION_MAILBOX)
            .unwrap();

        let receipt = origin_router
            .dispatch(&net.origin, DESTINATION_DOMAIN, b"ping")
            .unwrap();
        net.observe(&receipt);
        net.relay_checkpoint();
        assert!(net.prove(&receipt, 1));

        let outcome = net
            .destination
            .process(&receipt.message.to_bytes(), GAS)
            .unwrap();
        assert!(!outcome.success);
        assert!(inbox.0.read().is_empty());
        assert!(net
            .events
            .events()
            .iter()
            .any(|e| matches!(e, MailboxEvent::CounterpartUnenrolled { .. })));
    }
}
