//! # Contract Lifecycle
//!
//! ```text
//! [UNINITIALIZED] ──initialize──→ [ACTIVE] ──fraud proven──→ [FAILED]
//! ```
//!
//! `Failed` is terminal. Recovery happens outside the protocol (redeploy).

use serde::{Deserialize, Serialize};

/// Lifecycle state shared by origin and destination mailboxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractState {
    /// Constructed but not yet initialized.
    #[default]
    Uninitialized,
    /// Accepting mutations.
    Active,
    /// Halted after a fraud proof. Irreversible.
    Failed,
}

impl ContractState {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: ContractState) -> bool {
        matches!(
            (self, next),
            (Self::Uninitialized, Self::Active) | (Self::Active, Self::Failed)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Check if mutations are allowed.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ContractState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Uninitialized => "Uninitialized",
            Self::Active => "Active",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}
