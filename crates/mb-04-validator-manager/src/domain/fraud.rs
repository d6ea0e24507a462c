//! # Fraud Report

use serde::{Deserialize, Serialize};
use shared_types::{Address, Domain, Hash};

/// Evidence recorded when an origin is halted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudReport {
    /// Halted origin's domain
    pub origin_domain: Domain,
    /// Signed root
    pub root: Hash,
    /// Index the signature claims
    pub claimed_index: u64,
    /// Index the origin recorded for `root`, `None` if it never checkpointed it
    pub recorded_index: Option<u64>,
    /// Enrolled validators whose signatures formed the quorum
    pub signers: Vec<Address>,
}
