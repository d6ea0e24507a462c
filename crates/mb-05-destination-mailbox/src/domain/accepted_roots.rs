//! Accepted checkpoint table.
//!
//! Every accepted root stays usable forever so proofs built against an older
//! checkpoint keep verifying after newer ones arrive. Under the optimistic
//! profile a root is held in a FIFO queue until `confirm` runs after its
//! `confirm_at` time.

use super::errors::DestinationError;
use serde::{Deserialize, Serialize};
use shared_types::Hash;
use std::collections::{HashMap, VecDeque};

/// One accepted root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedRoot {
    /// Leaf count the root commits to
    pub index: u64,
    /// Unix seconds after which `confirm` may release it, optimistic only
    pub confirm_at: Option<u64>,
    /// Usable for proofs
    pub confirmed: bool,
}

/// Root table plus monotonic latest pointers.
///
/// `latest` tracks the newest submitted root and drives the freshness check.
/// `latest_confirmed` tracks the newest root usable for proofs; the two only
/// differ under the optimistic profile.
#[derive(Clone, Debug, Default)]
pub struct AcceptedRoots {
    roots: HashMap<Hash, AcceptedRoot>,
    latest: Option<(Hash, u64)>,
    latest_confirmed: Option<(Hash, u64)>,
    pending: VecDeque<Hash>,
}

impl AcceptedRoots {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `index` unless it is strictly newer than the latest accepted one.
    pub fn ensure_newer(&self, index: u64) -> Result<(), DestinationError> {
        let latest = self.latest_index();
        if index <= latest {
            return Err(DestinationError::StaleCheckpoint { index, latest });
        }
        Ok(())
    }

    /// Record `root`. `confirm_at = None` makes it usable immediately.
    pub fn accept(
        &mut self,
        root: Hash,
        index: u64,
        confirm_at: Option<u64>,
    ) -> Result<(), DestinationError> {
        self.ensure_newer(index)?;
        let confirmed = confirm_at.is_none();
        self.roots.insert(
            root,
            AcceptedRoot {
                index,
                confirm_at,
                confirmed,
            },
        );
        if confirmed {
            self.latest_confirmed = Some((root, index));
        } else {
            self.pending.push_back(root);
        }
        self.latest = Some((root, index));
        Ok(())
    }

    /// Release pending roots whose time has come, oldest first, stopping at
    /// the first one still waiting.
    pub fn confirm(&mut self, now: u64) -> Vec<(Hash, u64)> {
        let mut released = Vec::new();
        while let Some(root) = self.pending.front().copied() {
            let Some(entry) = self.roots.get_mut(&root) else {
                self.pending.pop_front();
                continue;
            };
            match entry.confirm_at {
                Some(at) if at > now => break,
                _ => {
                    entry.confirmed = true;
                    released.push((root, entry.index));
                    self.latest_confirmed = Some((root, entry.index));
                    self.pending.pop_front();
                }
            }
        }
        released
    }

    /// Usable for proofs.
    pub fn is_acceptable(&self, root: &Hash) -> bool {
        self.roots.get(root).is_some_and(|entry| entry.confirmed)
    }

    /// Entry for `root`, confirmed or not.
    pub fn get(&self, root: &Hash) -> Option<&AcceptedRoot> {
        self.roots.get(root)
    }

    /// Latest submitted `(root, index)`, confirmed or not.
    pub fn latest(&self) -> Option<(Hash, u64)> {
        self.latest
    }

    /// Latest `(root, index)` usable for proofs.
    pub fn latest_confirmed(&self) -> Option<(Hash, u64)> {
        self.latest_confirmed
    }

    /// Latest accepted index, 0 before the first checkpoint.
    pub fn latest_index(&self) -> u64 {
        self.latest.map(|(_, index)| index).unwrap_or(0)
    }

    /// Roots waiting for confirmation.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
