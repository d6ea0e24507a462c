//! Connection Registry Service

use crate::domain::{ConnectionError, ConnectionMap, ConnectionResult};
use parking_lot::RwLock;
use shared_types::{short_hex, Address, Domain, EventSink, MailboxEvent, Ownable, ZERO_ADDRESS};
use std::sync::Arc;
use tracing::info;

struct RegistryState {
    ownable: Ownable,
    connections: ConnectionMap,
    origin: Option<Address>,
}

/// Owner-administered registry of local counterparts.
pub struct ConnectionRegistry<E: EventSink> {
    state: RwLock<RegistryState>,
    events: Arc<E>,
}

impl<E: EventSink> ConnectionRegistry<E> {
    /// Create an empty registry.
    pub fn new(owner: Address, events: Arc<E>) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                ownable: Ownable::new(owner),
                connections: ConnectionMap::new(),
                origin: None,
            }),
            events,
        }
    }

    /// Register `counterpart` as the local contract for `domain`.
    pub fn enroll_counterpart(
        &self,
        caller: &Address,
        counterpart: Address,
        domain: Domain,
    ) -> ConnectionResult<()> {
        if counterpart == ZERO_ADDRESS {
            return Err(ConnectionError::ZeroAddress);
        }
        if domain == 0 {
            return Err(ConnectionError::ZeroDomain);
        }
        let (previous_domain, evicted) = {
            let mut state = self.state.write();
            state.ownable.ensure_owner(caller)?;
            let previous_domain = state.connections.domain_of(&counterpart);
            let evicted = state.connections.enroll(counterpart, domain);
            (previous_domain, evicted)
        };

        if let Some(old) = previous_domain.filter(|d| *d != domain) {
            self.events.emit(MailboxEvent::CounterpartUnenrolled {
                counterpart,
                domain: old,
            });
        }
        if let Some(evicted) = evicted.filter(|c| *c != counterpart) {
            self.events.emit(MailboxEvent::CounterpartUnenrolled {
                counterpart: evicted,
                domain,
            });
        }
        info!(
            counterpart = %short_hex(&counterpart),
            domain,
            "[connections] counterpart enrolled"
        );
        self.events
            .emit(MailboxEvent::CounterpartEnrolled { counterpart, domain });
        Ok(())
    }

    /// Remove `counterpart`. Removing an unknown counterpart is a no-op.
    pub fn unenroll_counterpart(
        &self,
        caller: &Address,
        counterpart: Address,
    ) -> ConnectionResult<()> {
        let removed = {
            let mut state = self.state.write();
            state.ownable.ensure_owner(caller)?;
            state.connections.unenroll(&counterpart)
        };
        if let Some(domain) = removed {
            info!(
                counterpart = %short_hex(&counterpart),
                domain,
                "[connections] counterpart unenrolled"
            );
            self.events
                .emit(MailboxEvent::CounterpartUnenrolled { counterpart, domain });
        }
        Ok(())
    }

    /// Owner-gated change of the local origin mailbox.
    pub fn set_origin(&self, caller: &Address, origin: Address) -> ConnectionResult<()> {
        if origin == ZERO_ADDRESS {
            return Err(ConnectionError::ZeroAddress);
        }
        {
            let mut state = self.state.write();
            state.ownable.ensure_owner(caller)?;
            state.origin = Some(origin);
        }
        info!(origin = %short_hex(&origin), "[connections] origin set");
        self.events.emit(MailboxEvent::OriginSet { origin });
        Ok(())
    }

    /// Owner-gated ownership transfer.
    pub fn transfer_ownership(&self, caller: &Address, new_owner: Address) -> ConnectionResult<()> {
        let event = self.state.write().ownable.transfer_ownership(caller, new_owner)?;
        self.events.emit(event);
        Ok(())
    }

    /// Check if `address` may deliver inbound messages.
    pub fn is_registered_counterpart(&self, address: &Address) -> bool {
        self.state.read().connections.contains(address)
    }

    /// Remote domain served by `counterpart`.
    pub fn domain_of(&self, counterpart: &Address) -> Option<Domain> {
        self.state.read().connections.domain_of(counterpart)
    }

    /// Local counterpart for `domain`.
    pub fn counterpart_for(&self, domain: Domain) -> Option<Address> {
        self.state.read().connections.counterpart_for(domain)
    }

    /// Local origin mailbox.
    pub fn origin(&self) -> ConnectionResult<Address> {
        self.state.read().origin.ok_or(ConnectionError::NoOrigin)
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.state.read().ownable.owner()
    }
}
