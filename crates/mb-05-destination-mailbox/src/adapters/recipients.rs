//! In-memory recipient directory.

use crate::ports::{MessageRecipient, RecipientDirectory};
use parking_lot::RwLock;
use shared_types::{address_to_id, Address, Hash};
use std::collections::HashMap;
use std::sync::Arc;

/// Recipient id → handler map.
#[derive(Default)]
pub struct InMemoryRecipients {
    handlers: RwLock<HashMap<Hash, Arc<dyn MessageRecipient>>>,
}

impl InMemoryRecipients {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under a 32-byte recipient id.
    pub fn register(&self, recipient: Hash, handler: Arc<dyn MessageRecipient>) {
        self.handlers.write().insert(recipient, handler);
    }

    /// Register `handler` under the id of a 20-byte address.
    pub fn register_address(&self, address: &Address, handler: Arc<dyn MessageRecipient>) {
        self.register(address_to_id(address), handler);
    }

    /// Drop a registration.
    pub fn remove(&self, recipient: &Hash) -> bool {
        self.handlers.write().remove(recipient).is_some()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl RecipientDirectory for InMemoryRecipients {
    fn resolve(&self, recipient: &Hash) -> Option<Arc<dyn MessageRecipient>> {
        self.handlers.read().get(recipient).cloned()
    }
}
