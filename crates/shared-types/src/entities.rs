//! # Core Primitives
//!
//! Fixed-width identifiers and the keccak-256 helpers used for leaves,
//! message ids and checkpoint digests.

use sha3::{Digest, Keccak256};

/// A 32-byte keccak-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address. Used for callers, owners, validators and
/// local contract instances.
pub type Address = [u8; 20];

/// Identifier of a chain or execution environment.
pub type Domain = u32;

/// Identifier of a dispatched message (keccak of its canonical bytes).
pub type MessageId = Hash;

/// The all-zero hash.
pub const ZERO_HASH: Hash = [0u8; 32];

/// The all-zero address.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// keccak-256 of a single byte slice.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// keccak-256 over the concatenation of several slices, without allocating
/// the concatenated buffer.
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Left-pad a 20-byte address into a 32-byte sender/recipient id.
pub fn address_to_id(address: &Address) -> Hash {
    let mut id = [0u8; 32];
    id[12..].copy_from_slice(address);
    id
}

/// Recover the address from a 32-byte id. Returns `None` when the upper
/// 12 bytes are not zero.
pub fn id_to_address(id: &Hash) -> Option<Address> {
    if id[..12].iter().any(|b| *b != 0) {
        return None;
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&id[12..]);
    Some(address)
}

/// Short hex rendering for log fields.
pub fn short_hex(bytes: &[u8]) -> String {
    let full = hex::encode(bytes);
    if full.len() <= 16 {
        format!("0x{}", full)
    } else {
        format!("0x{}..{}", &full[..8], &full[full.len() - 6..])
    }
}
