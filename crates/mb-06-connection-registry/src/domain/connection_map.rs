//! Two-way counterpart ↔ domain map.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Domain};
use std::collections::HashMap;

/// Local counterpart contracts and the remote domains they serve.
///
/// Invariant: `by_domain[d] == c` iff `by_counterpart[c] == d`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionMap {
    by_counterpart: HashMap<Address, Domain>,
    by_domain: HashMap<Domain, Address>,
}

impl ConnectionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `counterpart ↔ domain`, dropping any mapping either side had.
    ///
    /// Returns the counterpart evicted from `domain`, if another one held it.
    pub fn enroll(&mut self, counterpart: Address, domain: Domain) -> Option<Address> {
        self.unenroll(&counterpart);
        let evicted = self.by_domain.insert(domain, counterpart);
        if let Some(previous) = evicted {
            self.by_counterpart.remove(&previous);
        }
        self.by_counterpart.insert(counterpart, domain);
        evicted
    }

    /// Drop `counterpart`. Returns the domain it served, if any.
    pub fn unenroll(&mut self, counterpart: &Address) -> Option<Domain> {
        let domain = self.by_counterpart.remove(counterpart)?;
        if self.by_domain.get(&domain) == Some(counterpart) {
            self.by_domain.remove(&domain);
        }
        Some(domain)
    }

    /// Domain served by `counterpart`.
    pub fn domain_of(&self, counterpart: &Address) -> Option<Domain> {
        self.by_counterpart.get(counterpart).copied()
    }

    /// Counterpart serving `domain`.
    pub fn counterpart_for(&self, domain: Domain) -> Option<Address> {
        self.by_domain.get(&domain).copied()
    }

    /// Check if `counterpart` is registered.
    pub fn contains(&self, counterpart: &Address) -> bool {
        self.by_counterpart.contains_key(counterpart)
    }

    /// Number of registered counterparts.
    pub fn len(&self) -> usize {
        self.by_counterpart.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.by_counterpart.is_empty()
    }
}
