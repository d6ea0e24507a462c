//! Validator set for one origin domain.
//!
//! Ordered by address so quorum checks can demand strictly ascending signers
//! and thereby reject duplicates in one pass.

use super::errors::{ValidatorError, ValidatorResult};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Domain, ZERO_ADDRESS};
use std::collections::BTreeSet;

/// Enrolled validators plus the number of signatures needed for a quorum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    validators: BTreeSet<Address>,
    threshold: usize,
}

impl ValidatorSet {
    /// Single-signer set, threshold 1.
    pub fn single(validator: Address) -> ValidatorResult<Self> {
        if validator == ZERO_ADDRESS {
            return Err(ValidatorError::ZeroValidator);
        }
        Ok(Self {
            validators: BTreeSet::from([validator]),
            threshold: 1,
        })
    }

    /// Add a validator. The first enrollment sets the threshold to 1.
    pub fn enroll(&mut self, domain: Domain, validator: Address) -> ValidatorResult<()> {
        if validator == ZERO_ADDRESS {
            return Err(ValidatorError::ZeroValidator);
        }
        if !self.validators.insert(validator) {
            return Err(ValidatorError::AlreadyEnrolled { domain, validator });
        }
        if self.threshold == 0 {
            self.threshold = 1;
        }
        Ok(())
    }

    /// Remove a validator without dropping below the threshold.
    pub fn unenroll(&mut self, domain: Domain, validator: &Address) -> ValidatorResult<()> {
        if !self.validators.contains(validator) {
            return Err(ValidatorError::NotEnrolled {
                domain,
                signer: *validator,
            });
        }
        let remaining = self.validators.len() - 1;
        if remaining < self.threshold {
            return Err(ValidatorError::BelowThreshold {
                validators: remaining,
                threshold: self.threshold,
            });
        }
        self.validators.remove(validator);
        Ok(())
    }

    /// Set the quorum threshold, `1..=len()`.
    pub fn set_threshold(&mut self, threshold: usize) -> ValidatorResult<()> {
        if threshold == 0 || threshold > self.validators.len() {
            return Err(ValidatorError::InvalidThreshold {
                threshold,
                validators: self.validators.len(),
            });
        }
        self.threshold = threshold;
        Ok(())
    }

    /// Check membership.
    pub fn contains(&self, validator: &Address) -> bool {
        self.validators.contains(validator)
    }

    /// Signatures needed for a quorum.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Number of enrolled validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Enrolled validators in ascending order.
    pub fn validators(&self) -> Vec<Address> {
        self.validators.iter().copied().collect()
    }

    /// Count enrolled signers, requiring strictly ascending order.
    ///
    /// Signers outside the set are skipped rather than rejected.
    pub fn count_enrolled(&self, signers: &[Address]) -> ValidatorResult<usize> {
        let mut previous: Option<&Address> = None;
        let mut count = 0;
        for signer in signers {
            if let Some(prev) = previous {
                if signer <= prev {
                    return Err(ValidatorError::UnsortedSigners);
                }
            }
            if self.validators.contains(signer) {
                count += 1;
            }
            previous = Some(signer);
        }
        Ok(count)
    }
}
