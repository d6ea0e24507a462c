//! # Shared Types Crate
//!
//! Types shared by the origin mailbox, the destination mailbox, the validator
//! manager and the connection registry.
//!
//! ## Contents
//!
//! - **Primitives**: `Hash`, `Address`, `Domain`, keccak helpers
//! - **Message**: the canonical wire format whose keccak hash is both the Merkle
//!   leaf and the message id
//! - **ContractState**: `Uninitialized → Active → Failed` lifecycle
//! - **Events**: `MailboxEvent` plus the `EventSink` port every component emits into
//! - **Ownership**: explicit-caller owner checks for administrative mutations
//!
//! ## Design Principles
//!
//! - **Explicit identity**: every mutation takes the caller `Address` as a
//!   parameter; nothing reads an ambient sender.
//! - **Single wire format**: origin and destination agree on one encoding defined
//!   in [`message`].

pub mod access;
pub mod entities;
pub mod errors;
pub mod events;
pub mod message;
pub mod state;

pub use access::Ownable;
pub use entities::*;
pub use errors::*;
pub use events::{EventSink, MailboxEvent, RecordingEventSink, TracingEventSink};
pub use message::{Message, MESSAGE_HEADER_LEN, MESSAGE_VERSION};
pub use state::ContractState;
