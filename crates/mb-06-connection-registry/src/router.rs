//! Application router.
//!
//! Keeps one trusted router id per remote domain. Outbound messages are
//! addressed to the enrolled router on the destination; inbound deliveries
//! are accepted only from registered counterparts carrying a message sent by
//! the enrolled router on the origin.

use crate::domain::{ConnectionError, ConnectionResult};
use crate::ports::RouterHandler;
use crate::service::ConnectionRegistry;
use mb_03_origin_mailbox::{DispatchReceipt, OriginApi};
use mb_05_destination_mailbox::{DeliveryContext, GasMeter, HandlerError, MessageRecipient};
use parking_lot::RwLock;
use shared_types::{short_hex, Address, Domain, EventSink, Hash, MailboxEvent, Ownable};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

struct RouterState {
    ownable: Ownable,
    remotes: HashMap<Domain, Hash>,
}

/// Router over a connection registry.
pub struct Router<H: RouterHandler, E: EventSink> {
    address: Address,
    registry: Arc<ConnectionRegistry<E>>,
    state: RwLock<RouterState>,
    handler: H,
    events: Arc<E>,
}

impl<H: RouterHandler, E: EventSink> Router<H, E> {
    /// Create a router at `address`.
    pub fn new(
        address: Address,
        owner: Address,
        registry: Arc<ConnectionRegistry<E>>,
        handler: H,
        events: Arc<E>,
    ) -> Self {
        Self {
            address,
            registry,
            state: RwLock::new(RouterState {
                ownable: Ownable::new(owner),
                remotes: HashMap::new(),
            }),
            handler,
            events,
        }
    }

    /// Owner-gated: trust `router` as this application's router on `domain`.
    pub fn enroll_remote_router(
        &self,
        caller: &Address,
        domain: Domain,
        router: Hash,
    ) -> ConnectionResult<()> {
        {
            let mut state = self.state.write();
            state.ownable.ensure_owner(caller)?;
            state.remotes.insert(domain, router);
        }
        info!(domain, router = %short_hex(&router), "[router] remote router enrolled");
        self.events
            .emit(MailboxEvent::RemoteRouterEnrolled { domain, router });
        Ok(())
    }

    /// Router enrolled for `domain`.
    pub fn remote_router(&self, domain: Domain) -> Option<Hash> {
        self.state.read().remotes.get(&domain).copied()
    }

    /// Check if `sender` is the router enrolled for `domain`.
    pub fn is_remote_router(&self, domain: Domain, sender: &Hash) -> bool {
        self.remote_router(domain).as_ref() == Some(sender)
    }

    /// Authenticate an inbound delivery.
    pub fn authenticate(
        &self,
        caller: &Address,
        origin: Domain,
        sender: &Hash,
    ) -> ConnectionResult<()> {
        if !self.registry.is_registered_counterpart(caller) {
            debug!(caller = %short_hex(caller), "[router] unregistered mailbox");
            return Err(ConnectionError::UnregisteredCounterpart { caller: *caller });
        }
        if !self.is_remote_router(origin, sender) {
            debug!(origin, sender = %short_hex(sender), "[router] unknown sender");
            return Err(ConnectionError::UnknownSender {
                domain: origin,
                sender: *sender,
            });
        }
        Ok(())
    }

    /// Send `body` to this application's router on `destination`.
    pub fn dispatch<O: OriginApi + ?Sized>(
        &self,
        origin: &O,
        destination: Domain,
        body: &[u8],
    ) -> ConnectionResult<DispatchReceipt> {
        let recipient = self
            .remote_router(destination)
            .ok_or(ConnectionError::NoRemoteRouter {
                domain: destination,
            })?;
        Ok(origin.dispatch(&self.address, destination, recipient, body)?)
    }

    /// Address this router dispatches from.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl<H: RouterHandler, E: EventSink> MessageRecipient for Router<H, E> {
    fn handle(
        &self,
        ctx: &DeliveryContext<'_>,
        origin: Domain,
        sender: Hash,
        body: &[u8],
        meter: &mut GasMeter,
    ) -> Result<Vec<u8>, HandlerError> {
        self.authenticate(&ctx.mailbox_address, origin, &sender)
            .map_err(|e| HandlerError::Rejected(e.to_string()))?;
        self.handler.handle_message(origin, sender, body, meter)
    }
}
