//! Non-reentrant flag for `process`.
//!
//! One flag per mailbox instance, not per message. A collision fails
//! immediately; nothing waits.

use super::errors::DestinationError;
use std::sync::atomic::{AtomicBool, Ordering};

/// `entered ∈ {false, true}`.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: AtomicBool,
}

impl ReentrancyGuard {
    /// Create an unentered guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter, or fail with `Reentrant` if already entered.
    pub fn enter(&self) -> Result<GuardToken<'_>, DestinationError> {
        self.entered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DestinationError::Reentrant)?;
        Ok(GuardToken { guard: self })
    }

    /// Check if a `process` call is in flight.
    pub fn is_entered(&self) -> bool {
        self.entered.load(Ordering::Acquire)
    }
}

/// Clears the flag on drop, including during unwinding.
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.entered.store(false, Ordering::Release);
    }
}
