//! Signing configuration.

use serde::{Deserialize, Serialize};

/// What the ECDSA signature is computed over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigestScheme {
    /// `keccak("\x19Ethereum Signed Message:\n32" ‖ digest)`, what EVM
    /// validators produce with `personal_sign`.
    #[default]
    EthSignedMessage,
    /// The checkpoint digest itself.
    Raw,
}

/// Parameters shared by signers and verifiers. Both sides must agree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Literal mixed into the domain hash
    pub protocol_tag: String,
    /// Prefix convention applied before signing
    pub scheme: DigestScheme,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            protocol_tag: "HYPERLANE".to_string(),
            scheme: DigestScheme::EthSignedMessage,
        }
    }
}

impl SigningConfig {
    /// Separate tag so test signatures never verify under production settings.
    pub fn for_testing() -> Self {
        Self {
            protocol_tag: "MAILBOX_TEST".to_string(),
            scheme: DigestScheme::EthSignedMessage,
        }
    }

    /// Settings with a specific protocol tag.
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            protocol_tag: tag.into(),
            ..Self::default()
        }
    }
}
