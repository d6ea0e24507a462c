//! Gas meter handed to recipient handlers.
//!
//! Handlers charge it as they go. Exhaustion is sticky: a handler that
//! swallows `OutOfGas` still fails, because the mailbox checks
//! [`GasMeter::exhausted`] after the call. Running out, or running past the
//! wall-clock deadline, fails only the inner delivery attempt.

use super::errors::HandlerError;
use std::time::{Duration, Instant};

/// Bounded compute budget for one handler call.
#[derive(Debug)]
pub struct GasMeter {
    limit: u64,
    used: u64,
    exhausted: bool,
    started: Instant,
    timeout: Option<Duration>,
}

impl GasMeter {
    /// Budget with no deadline.
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            used: 0,
            exhausted: false,
            started: Instant::now(),
            timeout: None,
        }
    }

    /// Budget that also expires after `timeout`.
    pub fn with_timeout(limit: u64, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::new(limit)
        }
    }

    /// Spend `amount`. Exhaustion pins `used` at the limit.
    pub fn charge(&mut self, amount: u64) -> Result<(), HandlerError> {
        self.check_deadline()?;
        let remaining = self.remaining();
        if amount > remaining {
            self.used = self.limit;
            self.exhausted = true;
            return Err(HandlerError::OutOfGas { limit: self.limit });
        }
        self.used += amount;
        Ok(())
    }

    /// Fail once the deadline has passed.
    pub fn check_deadline(&self) -> Result<(), HandlerError> {
        if let Some(timeout) = self.timeout {
            let elapsed = self.started.elapsed();
            if elapsed > timeout {
                return Err(HandlerError::Timeout {
                    elapsed_ms: elapsed.as_millis() as u64,
                    max_ms: timeout.as_millis() as u64,
                });
            }
        }
        Ok(())
    }

    /// Whether any charge has exceeded the budget.
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fail if the budget was ever exceeded or the deadline has passed.
    pub fn settle(&self) -> Result<(), HandlerError> {
        if self.exhausted {
            return Err(HandlerError::OutOfGas { limit: self.limit });
        }
        self.check_deadline()
    }

    /// Gas left.
    pub fn remaining(&self) -> u64 {
        self.limit - self.used
    }

    /// Gas spent.
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Budget.
    pub fn limit(&self) -> u64 {
        self.limit
    }
}
