//! # Ownership
//!
//! Owner-gated administration with the caller passed explicitly.

use crate::entities::{Address, ZERO_ADDRESS};
use crate::errors::AccessError;
use crate::events::MailboxEvent;
use serde::{Deserialize, Serialize};

/// Holds the owner of an administrative surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownable {
    owner: Address,
}

impl Ownable {
    /// Create with an initial owner.
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Fail unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), AccessError> {
        if *caller != self.owner {
            return Err(AccessError::NotOwner {
                caller: *caller,
                owner: self.owner,
            });
        }
        Ok(())
    }

    /// Hand ownership to `new_owner`. Returns the change event to emit.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<MailboxEvent, AccessError> {
        self.ensure_owner(caller)?;
        if new_owner == ZERO_ADDRESS {
            return Err(AccessError::ZeroAddress);
        }
        let previous = std::mem::replace(&mut self.owner, new_owner);
        Ok(MailboxEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        })
    }
}
