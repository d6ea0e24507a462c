//! # Checkpoint Digests
//!
//! Bit-exact layout consumed by validators. See the crate docs for the table.

use crate::config::{DigestScheme, SigningConfig};
use shared_types::{keccak256_concat, Domain, Hash};

const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Domain separator for one origin mailbox under one protocol tag.
pub fn domain_hash(origin_domain: Domain, origin_mailbox: &Hash, protocol_tag: &str) -> Hash {
    keccak256_concat(&[
        &origin_domain.to_be_bytes(),
        origin_mailbox,
        protocol_tag.as_bytes(),
    ])
}

/// `keccak(domain_hash ‖ root ‖ index)`.
pub fn checkpoint_digest(domain_hash: &Hash, root: &Hash, index: u64) -> Hash {
    keccak256_concat(&[domain_hash, root, &index.to_be_bytes()])
}

/// EIP-191 personal message hash of a 32-byte digest.
pub fn eth_signed_message_hash(digest: &Hash) -> Hash {
    keccak256_concat(&[ETH_SIGNED_MESSAGE_PREFIX, digest])
}

/// Final 32 bytes handed to ECDSA under `config`.
pub(crate) fn prehash(digest: &Hash, config: &SigningConfig) -> Hash {
    match config.scheme {
        DigestScheme::EthSignedMessage => eth_signed_message_hash(digest),
        DigestScheme::Raw => *digest,
    }
}
