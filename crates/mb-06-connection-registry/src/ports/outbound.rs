//! Driven Ports (SPI - Outbound)

use mb_05_destination_mailbox::{GasMeter, HandlerError};
use shared_types::{Domain, Hash};

/// Application logic behind a [`Router`](crate::Router). Only called after
/// the delivery has been authenticated.
pub trait RouterHandler: Send + Sync {
    /// Handle a message from the enrolled router on `origin`.
    fn handle_message(
        &self,
        origin: Domain,
        sender: Hash,
        body: &[u8],
        meter: &mut GasMeter,
    ) -> Result<Vec<u8>, HandlerError>;
}
