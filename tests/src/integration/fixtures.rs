//! Shared two-chain fixture.

use mb_01_merkle_accumulator::{Prover, TREE_DEPTH};
use mb_02_checkpoint_signatures::{
    Checkpoint, CheckpointSigner, RecoverableSignature, SigningConfig,
};
use mb_03_origin_mailbox::{DispatchReceipt, OriginApi, OriginConfig, OriginMailbox};
use mb_04_validator_manager::ValidatorManager;
use mb_05_destination_mailbox::{
    DeliveryContext, DestinationApi, DestinationConfig, DestinationMailbox, GasMeter,
    HandlerError, InMemoryRecipients, ManualClock, MessageRecipient,
};
use parking_lot::RwLock;
use shared_types::{address_to_id, Address, Domain, Hash, RecordingEventSink};
use std::sync::Arc;

pub const ORIGIN_DOMAIN: Domain = 1000;
pub const DESTINATION_DOMAIN: Domain = 2000;

pub const OWNER: Address = [0x01; 20];
pub const MANAGER: Address = [0x02; 20];
pub const SENDER: Address = [0x03; 20];
pub const DESTINATION_MAILBOX: Address = [0x05; 20];
pub const RECIPIENT: Address = [0x07; 20];
pub const ORIGIN_MAILBOX_ID: Hash = [0x0A; 32];

/// Comfortably above `process_gas + reserve_gas`.
pub const GAS: u64 = 1_000_000;

/// Start time of the manual clock.
pub const GENESIS_TIME: u64 = 1_700_000_000;

pub type TestDestination = DestinationMailbox<InMemoryRecipients, ManualClock, RecordingEventSink>;

/// Recipient that records every delivery and echoes the body.
#[derive(Default)]
pub struct RecordingRecipient {
    pub received: RwLock<Vec<(Domain, Hash, Vec<u8>)>>,
}

impl RecordingRecipient {
    pub fn bodies(&self) -> Vec<Vec<u8>> {
        self.received
            .read()
            .iter()
            .map(|(_, _, body)| body.clone())
            .collect()
    }
}

impl MessageRecipient for RecordingRecipient {
    fn handle(
        &self,
        _ctx: &DeliveryContext<'_>,
        origin: Domain,
        sender: Hash,
        body: &[u8],
        meter: &mut GasMeter,
    ) -> Result<Vec<u8>, HandlerError> {
        meter.charge(5_000)?;
        self.received.write().push((origin, sender, body.to_vec()));
        Ok(body.to_vec())
    }
}

/// Origin on 1000, destination on 2000, one validator, one recipient.
pub struct Network {
    pub origin: OriginMailbox<RecordingEventSink>,
    pub manager: Arc<ValidatorManager<RecordingEventSink>>,
    pub destination: TestDestination,
    pub recipients: Arc<InMemoryRecipients>,
    pub recipient: Arc<RecordingRecipient>,
    pub clock: Arc<ManualClock>,
    pub validator: CheckpointSigner,
    pub signing: SigningConfig,
    /// Relayer-side mirror of the origin tree
    pub relayer: Prover,
    pub origin_events: Arc<RecordingEventSink>,
    pub events: Arc<RecordingEventSink>,
}

impl Network {
    /// Immediate-acceptance network.
    pub fn new() -> Self {
        Self::with_config(DestinationConfig::new(
            DESTINATION_DOMAIN,
            ORIGIN_DOMAIN,
            ORIGIN_MAILBOX_ID,
        ))
    }

    /// Network whose destination uses `config`.
    pub fn with_config(config: DestinationConfig) -> Self {
        let origin_events = Arc::new(RecordingEventSink::new());
        let events = Arc::new(RecordingEventSink::new());
        let signing = SigningConfig::for_testing();

        let origin = OriginMailbox::new(
            OriginConfig::new(ORIGIN_DOMAIN, ORIGIN_MAILBOX_ID),
            OWNER,
            MANAGER,
            Arc::clone(&origin_events),
        )
        .unwrap();
        origin.initialize(&OWNER).unwrap();

        let validator = CheckpointSigner::random();
        let manager = Arc::new(ValidatorManager::new(
            MANAGER,
            OWNER,
            signing.clone(),
            Arc::clone(&events),
        ));
        manager
            .set_validator(&OWNER, ORIGIN_DOMAIN, validator.address())
            .unwrap();

        let recipients = Arc::new(InMemoryRecipients::new());
        let recipient = Arc::new(RecordingRecipient::default());
        recipients.register_address(&RECIPIENT, recipient.clone());
        let clock = Arc::new(ManualClock::new(GENESIS_TIME));

        let destination = DestinationMailbox::new(
            config,
            DESTINATION_MAILBOX,
            OWNER,
            manager.clone(),
            Arc::clone(&recipients),
            Arc::clone(&clock),
            Arc::clone(&events),
        )
        .unwrap();
        destination.initialize(&OWNER).unwrap();

        Self {
            origin,
            manager,
            destination,
            recipients,
            recipient,
            clock,
            validator,
            signing,
            relayer: Prover::new(),
            origin_events,
            events,
        }
    }

    /// Dispatch `body` to the recorder and mirror the leaf on the relayer.
    pub fn dispatch(&mut self, body: &[u8]) -> DispatchReceipt {
        self.dispatch_to(address_to_id(&RECIPIENT), body)
    }

    /// Dispatch `body` to `recipient` from [`SENDER`].
    pub fn dispatch_to(&mut self, recipient: Hash, body: &[u8]) -> DispatchReceipt {
        let receipt = self
            .origin
            .dispatch(&SENDER, DESTINATION_DOMAIN, recipient, body)
            .unwrap();
        self.observe(&receipt);
        receipt
    }

    /// Mirror a receipt produced outside [`Network::dispatch`].
    pub fn observe(&mut self, receipt: &DispatchReceipt) {
        let index = self.relayer.ingest(receipt.message_id).unwrap();
        assert_eq!(index, receipt.leaf_index);
    }

    /// Snapshot the origin.
    pub fn checkpoint(&self) -> Checkpoint {
        self.origin.checkpoint().unwrap()
    }

    /// Validator signature over `(root, index)` for the origin domain.
    pub fn sign(&self, root: Hash, index: u64) -> RecoverableSignature {
        self.sign_with(&self.validator, root, index)
    }

    /// Signature by an arbitrary key.
    pub fn sign_with(&self, signer: &CheckpointSigner, root: Hash, index: u64) -> RecoverableSignature {
        let checkpoint = Checkpoint {
            origin_domain: ORIGIN_DOMAIN,
            origin_mailbox: ORIGIN_MAILBOX_ID,
            root,
            index,
        };
        signer.sign_checkpoint(&checkpoint, &self.signing).unwrap().signature
    }

    /// Checkpoint the origin, sign it and submit it to the destination.
    pub fn relay_checkpoint(&self) -> Checkpoint {
        let checkpoint = self.checkpoint();
        self.destination
            .submit_checkpoint(
                checkpoint.root,
                checkpoint.index,
                &self.sign(checkpoint.root, checkpoint.index),
            )
            .unwrap();
        checkpoint
    }

    /// Sibling path for `leaf_index` in the tree of the first `count` leaves.
    pub fn proof(&self, leaf_index: u32, count: u64) -> [Hash; TREE_DEPTH] {
        self.relayer.prove_at(leaf_index, count).unwrap().path
    }

    /// Prove a dispatched message against the root of `count` leaves.
    pub fn prove(&self, receipt: &DispatchReceipt, count: u64) -> bool {
        self.destination
            .prove(
                receipt.message_id,
                &self.proof(receipt.leaf_index, count),
                receipt.leaf_index,
            )
            .unwrap()
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
