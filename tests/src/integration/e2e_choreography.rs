//! # End-to-End Choreography
//!
//! Full message lifecycle across both chains:
//!
//! ```text
//! OriginMailbox ──dispatch──→ tree ──checkpoint──→ (root, index)
//!      │                                              │
//!      │                                     validator signs
//!      ▼                                              ▼
//!   Prover (relayer) ──proof──→ DestinationMailbox ←─submit_checkpoint
//!                                      │
//!                              prove → process → recipient
//! ```

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use mb_02_checkpoint_signatures::CheckpointSigner;
    use mb_03_origin_mailbox::OriginApi;
    use mb_04_validator_manager::ValidatorError;
    use mb_05_destination_mailbox::{DestinationApi, DestinationError, MessageStatus};
    use shared_types::{address_to_id, MailboxEvent};

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn test_three_messages_delivered_exactly_once() {
        let mut net = Network::new();
        let receipts: Vec<_> = [b"a", b"b", b"c"]
            .iter()
            .map(|body| net.dispatch(*body))
            .collect();

        let checkpoint = net.relay_checkpoint();
        assert_eq!(checkpoint.index, 3);
        assert_eq!(checkpoint.root, net.relayer.root());
        assert_eq!(
            net.destination.latest_checkpoint(),
            Some((checkpoint.root, 3))
        );

        for receipt in &receipts {
            assert!(net.prove(receipt, 3));
            assert_eq!(
                net.destination.message_status(&receipt.message_id),
                MessageStatus::Proven
            );
        }

        for receipt in &receipts {
            let outcome = net
                .destination
                .process(&receipt.message.to_bytes(), GAS)
                .unwrap();
            assert!(outcome.success);
            assert_eq!(
                net.destination.message_status(&receipt.message_id),
                MessageStatus::Processed
            );
        }
        assert_eq!(
            net.recipient.bodies(),
            vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
        );

        let again = net.destination.process(&receipts[1].message.to_bytes(), GAS);
        assert_eq!(
            again,
            Err(DestinationError::AlreadyProcessed {
                message_id: receipts[1].message_id
            })
        );
        assert_eq!(net.recipient.bodies().len(), 3);
    }

    #[test]
    fn test_recipient_sees_origin_and_sender() {
        let mut net = Network::new();
        let receipt = net.dispatch(b"hello");
        net.relay_checkpoint();
        net.destination
            .prove_and_process(
                &receipt.message.to_bytes(),
                &net.proof(receipt.leaf_index, 1),
                receipt.leaf_index,
                GAS,
            )
            .unwrap();

        let received = net.recipient.received.read();
        assert_eq!(
            received[0],
            (ORIGIN_DOMAIN, address_to_id(&SENDER), b"hello".to_vec())
        );
    }

    #[test]
    fn test_events_on_both_chains() {
        let mut net = Network::new();
        let receipt = net.dispatch(b"x");
        net.relay_checkpoint();
        assert!(net.prove(&receipt, 1));
        net.destination
            .process(&receipt.message.to_bytes(), GAS)
            .unwrap();

        assert_eq!(net.origin_events.named("Dispatch").len(), 1);
        assert_eq!(net.origin_events.named("CheckpointCached").len(), 1);
        assert_eq!(net.events.named("CheckpointSubmitted").len(), 1);
        assert_eq!(net.events.named("MessageProven").len(), 1);
        match net.events.named("Process").as_slice() {
            [MailboxEvent::Process {
                message_id,
                success,
                return_data,
            }] => {
                assert_eq!(*message_id, receipt.message_id);
                assert!(*success);
                assert_eq!(return_data, b"x");
            }
            other => panic!("expected one Process event, got {other:?}"),
        }
    }

    // =========================================================================
    // CHECKPOINT ACCEPTANCE
    // =========================================================================

    #[test]
    fn test_unregistered_signer_rejected() {
        let mut net = Network::new();
        net.dispatch(b"a");
        net.relay_checkpoint();
        let before = net.destination.latest_checkpoint();

        net.dispatch(b"b");
        let checkpoint = net.checkpoint();
        let forger = CheckpointSigner::random();
        let result = net.destination.submit_checkpoint(
            checkpoint.root,
            checkpoint.index,
            &net.sign_with(&forger, checkpoint.root, checkpoint.index),
        );
        assert!(matches!(
            result,
            Err(DestinationError::InvalidSignature(
                ValidatorError::NotEnrolled { .. }
            ))
        ));
        assert_eq!(net.destination.latest_checkpoint(), before);
        assert!(!net.destination.is_acceptable_root(&checkpoint.root));
    }

    #[test]
    fn test_signature_bound_to_origin_mailbox() {
        let mut net = Network::new();
        net.dispatch(b"a");
        let checkpoint = net.checkpoint();
        // Same key, same root, different mailbox id.
        let foreign = mb_02_checkpoint_signatures::Checkpoint {
            origin_mailbox: [0xEE; 32],
            ..checkpoint
        };
        let sig = net
            .validator
            .sign_checkpoint(&foreign, &net.signing)
            .unwrap()
            .signature;
        assert!(net
            .destination
            .submit_checkpoint(checkpoint.root, checkpoint.index, &sig)
            .is_err());
    }

    #[test]
    fn test_monotonic_acceptance() {
        let mut net = Network::new();
        for body in [b"1", b"2", b"3", b"4", b"5"] {
            net.dispatch(body);
        }
        let latest = net.relay_checkpoint();
        assert_eq!(latest.index, 5);

        let stale_root = net.relayer.root_at(3).unwrap();
        for index in [3, 5] {
            assert_eq!(
                net.destination
                    .submit_checkpoint(stale_root, index, &net.sign(stale_root, index)),
                Err(DestinationError::StaleCheckpoint { index, latest: 5 })
            );
        }
        assert_eq!(
            net.destination.latest_checkpoint(),
            Some((latest.root, 5))
        );
    }

    // =========================================================================
    // HISTORICAL ROOTS
    // =========================================================================

    #[test]
    fn test_proof_against_superseded_root() {
        let mut net = Network::new();
        let receipts: Vec<_> = (0u8..6).map(|i| net.dispatch(&[i])).collect();
        let m = &receipts[5];
        assert_eq!(m.leaf_index, 5);
        let r1 = net.relay_checkpoint();
        assert_eq!(r1.index, 6);

        net.dispatch(b"late-1");
        net.dispatch(b"late-2");
        let r2 = net.relay_checkpoint();
        assert_eq!(r2.index, 8);
        assert_ne!(r1.root, r2.root);
        assert_eq!(net.destination.latest_checkpoint(), Some((r2.root, 8)));

        let proof = net.proof(m.leaf_index, r1.index);
        assert!(net
            .destination
            .prove(m.message_id, &proof, m.leaf_index)
            .unwrap());
        assert!(net
            .destination
            .process(&m.message.to_bytes(), GAS)
            .unwrap()
            .success);
    }

    #[test]
    fn test_proof_against_unsubmitted_root() {
        let mut net = Network::new();
        let first = net.dispatch(b"a");
        net.relay_checkpoint();
        let second = net.dispatch(b"b");

        // Folds to the 2-leaf root, which nobody submitted.
        assert!(!net.prove(&second, 2));
        assert_eq!(
            net.destination.message_status(&second.message_id),
            MessageStatus::None
        );
        assert_eq!(
            net.destination.process(&second.message.to_bytes(), GAS),
            Err(DestinationError::NotProven {
                message_id: second.message_id
            })
        );
        assert!(net.prove(&first, 1));
    }

    // =========================================================================
    // EXACTLY ONCE
    // =========================================================================

    #[test]
    fn test_prove_twice_rejected() {
        let mut net = Network::new();
        let receipt = net.dispatch(b"a");
        net.relay_checkpoint();
        assert!(net.prove(&receipt, 1));
        assert_eq!(
            net.destination.prove(
                receipt.message_id,
                &net.proof(receipt.leaf_index, 1),
                receipt.leaf_index
            ),
            Err(DestinationError::AlreadyProven {
                message_id: receipt.message_id
            })
        );
    }

    #[test]
    fn test_failed_delivery_is_not_retried() {
        let mut net = Network::new();
        let receipt = net.dispatch_to([0x99; 32], b"nobody home");
        net.relay_checkpoint();
        assert!(net.prove(&receipt, 1));

        let outcome = net
            .destination
            .process(&receipt.message.to_bytes(), GAS)
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(
            net.destination.message_status(&receipt.message_id),
            MessageStatus::Processed
        );
        assert!(matches!(
            net.destination.process(&receipt.message.to_bytes(), GAS),
            Err(DestinationError::AlreadyProcessed { .. })
        ));
    }

    #[test]
    fn test_rejected_process_keeps_message_retryable() {
        let mut net = Network::new();
        let receipt = net.dispatch(b"a");
        net.relay_checkpoint();
        assert!(net.prove(&receipt, 1));

        let required = net.destination.config().required_gas();
        assert_eq!(
            net.destination
                .process(&receipt.message.to_bytes(), required - 1),
            Err(DestinationError::InsufficientGas {
                available: required - 1,
                required
            })
        );
        assert_eq!(
            net.destination.message_status(&receipt.message_id),
            MessageStatus::Proven
        );
        assert!(net
            .destination
            .process(&receipt.message.to_bytes(), required)
            .unwrap()
            .success);
    }

    #[test]
    fn test_origin_checkpoint_cache_records_history() {
        let mut net = Network::new();
        net.dispatch(b"a");
        let c1 = net.checkpoint();
        net.dispatch(b"b");
        let c2 = net.checkpoint();
        assert_eq!(net.origin.cached_checkpoint_index(&c1.root), Some(1));
        assert_eq!(net.origin.cached_checkpoint_index(&c2.root), Some(2));
        assert_eq!(net.origin.latest_checkpoint(), Some(c2));
    }
}
