//! # Mailbox Events
//!
//! Every observable state change is reported as a [`MailboxEvent`] through an
//! [`EventSink`]. Administrative mutations emit a change event each.

use crate::entities::{short_hex, Address, Domain, Hash, MessageId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Observable record of a state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailboxEvent {
    /// A message was inserted into the origin tree.
    Dispatch {
        /// Message id (leaf)
        message_id: MessageId,
        /// Position of the leaf, always `count - 1` at emission
        leaf_index: u64,
        /// `destination << 32 | nonce`
        destination_and_nonce: u64,
        /// Canonical message bytes
        message: Vec<u8>,
    },
    /// The origin snapshotted `(root, count)` as its latest checkpoint.
    CheckpointCached {
        /// Tree root
        root: Hash,
        /// Leaf count
        index: u64,
    },
    /// A destination accepted a signed checkpoint.
    CheckpointSubmitted {
        /// Remote (origin) domain
        domain: Domain,
        /// Accepted root
        root: Hash,
        /// Accepted index
        index: u64,
        /// Unix time after which the root is usable, optimistic profile only
        confirm_at: Option<u64>,
    },
    /// An optimistically submitted root became usable for proofs.
    CheckpointConfirmed {
        /// Confirmed root
        root: Hash,
        /// Its index
        index: u64,
    },
    /// A leaf was proven against an accepted root.
    MessageProven {
        /// Message id (leaf)
        message_id: MessageId,
        /// Leaf index used in the proof
        leaf_index: u64,
        /// Root the proof folded to
        root: Hash,
    },
    /// A delivery attempt finished.
    Process {
        /// Message id
        message_id: MessageId,
        /// Whether the recipient handler returned successfully
        success: bool,
        /// Return or error data, truncated
        return_data: Vec<u8>,
    },
    /// A contract entered the terminal `Failed` state.
    Fail {
        /// Domain of the halted contract
        domain: Domain,
    },
    /// A validly signed checkpoint contradicted origin history.
    ImproperCheckpoint {
        /// Origin domain
        origin_domain: Domain,
        /// Signed root
        root: Hash,
        /// Index claimed by the signature
        claimed_index: u64,
        /// Index the origin actually recorded for `root`
        recorded_index: Option<u64>,
        /// Enrolled signers that formed the quorum, ascending
        signers: Vec<Address>,
    },
    /// Validator added to a domain's set.
    ValidatorEnrolled {
        /// Domain
        domain: Domain,
        /// Validator address
        validator: Address,
    },
    /// Validator removed from a domain's set.
    ValidatorUnenrolled {
        /// Domain
        domain: Domain,
        /// Validator address
        validator: Address,
    },
    /// Quorum threshold changed.
    ThresholdSet {
        /// Domain
        domain: Domain,
        /// New threshold
        threshold: usize,
    },
    /// A mailbox was pointed at a new validator manager.
    ValidatorManagerSet {
        /// Validator manager address
        validator_manager: Address,
    },
    /// A local contract was enrolled as the counterpart for a remote domain.
    CounterpartEnrolled {
        /// Local contract address
        counterpart: Address,
        /// Remote domain
        domain: Domain,
    },
    /// A local contract was removed from the registry.
    CounterpartUnenrolled {
        /// Local contract address
        counterpart: Address,
        /// Remote domain it served
        domain: Domain,
    },
    /// The registry's origin mailbox changed.
    OriginSet {
        /// Origin mailbox address
        origin: Address,
    },
    /// A remote router was enrolled for a domain.
    RemoteRouterEnrolled {
        /// Remote domain
        domain: Domain,
        /// Router id on that domain
        router: Hash,
    },
    /// Ownership moved.
    OwnershipTransferred {
        /// Previous owner
        previous: Address,
        /// New owner
        new: Address,
    },
}

impl MailboxEvent {
    /// Stable event name for logs and metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dispatch { .. } => "Dispatch",
            Self::CheckpointCached { .. } => "CheckpointCached",
            Self::CheckpointSubmitted { .. } => "CheckpointSubmitted",
            Self::CheckpointConfirmed { .. } => "CheckpointConfirmed",
            Self::MessageProven { .. } => "MessageProven",
            Self::Process { .. } => "Process",
            Self::Fail { .. } => "Fail",
            Self::ImproperCheckpoint { .. } => "ImproperCheckpoint",
            Self::ValidatorEnrolled { .. } => "ValidatorEnrolled",
            Self::ValidatorUnenrolled { .. } => "ValidatorUnenrolled",
            Self::ThresholdSet { .. } => "ThresholdSet",
            Self::ValidatorManagerSet { .. } => "ValidatorManagerSet",
            Self::CounterpartEnrolled { .. } => "CounterpartEnrolled",
            Self::CounterpartUnenrolled { .. } => "CounterpartUnenrolled",
            Self::OriginSet { .. } => "OriginSet",
            Self::RemoteRouterEnrolled { .. } => "RemoteRouterEnrolled",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}

/// Outbound port for events.
pub trait EventSink: Send + Sync {
    /// Publish one event.
    fn emit(&self, event: MailboxEvent);
}

/// Keeps every event in memory. Used by tests and by relayers that poll.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: RwLock<Vec<MailboxEvent>>,
}

impl RecordingEventSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<MailboxEvent> {
        self.events.read().clone()
    }

    /// Remove and return all recorded events.
    pub fn drain(&self) -> Vec<MailboxEvent> {
        std::mem::take(&mut *self.events.write())
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Events with the given name, in emission order.
    pub fn named(&self, name: &str) -> Vec<MailboxEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.name() == name)
            .cloned()
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: MailboxEvent) {
        self.events.write().push(event);
    }
}

/// Writes each event to the tracing subscriber as a JSON payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: MailboxEvent) {
        let payload = serde_json::to_string(&event).unwrap_or_else(|e| e.to_string());
        if let MailboxEvent::Dispatch { message_id, .. } | MailboxEvent::Process { message_id, .. } =
            &event
        {
            tracing::info!(event = event.name(), message_id = %short_hex(message_id), %payload, "[events] emitted");
        } else {
            tracing::info!(event = event.name(), %payload, "[events] emitted");
        }
    }
}

impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    fn emit(&self, event: MailboxEvent) {
        (**self).emit(event)
    }
}
