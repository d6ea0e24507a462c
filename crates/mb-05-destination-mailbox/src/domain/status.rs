//! Per-message delivery status.

use serde::{Deserialize, Serialize};

/// `None → Proven → Processed`, forward only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageStatus {
    /// Never seen.
    #[default]
    None,
    /// Leaf verified against an accepted root.
    Proven,
    /// Delivery attempted. Terminal.
    Processed,
}

impl MessageStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: MessageStatus) -> bool {
        matches!(
            (self, next),
            (Self::None, Self::Proven) | (Self::Proven, Self::Processed)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Processed)
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Proven => "Proven",
            Self::Processed => "Processed",
        };
        f.write_str(name)
    }
}
