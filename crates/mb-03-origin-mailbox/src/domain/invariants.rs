//! # Domain Invariants
//!
//! Preconditions checked before the origin mutates its tree.

use super::errors::OriginError;
use shared_types::ContractState;

/// Invariant: bodies are bounded so every message has a bounded delivery cost.
pub fn invariant_body_size(len: usize, max: usize) -> Result<(), OriginError> {
    if len > max {
        return Err(OriginError::BodyTooLarge { len, max });
    }
    Ok(())
}

/// Invariant: only an active origin with at least one leaf can checkpoint.
pub fn invariant_checkpointable(state: ContractState, count: u64) -> Result<(), OriginError> {
    if !state.is_active() {
        return Err(OriginError::NotActive { state });
    }
    if count == 0 {
        return Err(OriginError::EmptyTree);
    }
    Ok(())
}
