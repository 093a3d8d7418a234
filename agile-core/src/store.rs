use std::collections::{BTreeMap, btree_map::Entry};

use crate::{RateKey, UnitRate};

/// Ordered, deduplicating collection of slots.
///
/// - Ordered by `valid_from`, then `value_inc_vat`.
/// - Two slots with the same key are the same slot; the first one inserted wins.
/// - There is no removal; a store only grows.
#[derive(Debug, Clone, Default)]
pub struct RateStore {
    rates: BTreeMap<RateKey, UnitRate>,
}

impl RateStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Insert a slot. Returns `true` if it was not already present.
    pub fn insert(&mut self, rate: UnitRate) -> bool {
        match self.rates.entry(rate.key()) {
            Entry::Vacant(v) => {
                v.insert(rate);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Insert every slot and return how many were new.
    pub fn merge_all<I>(&mut self, rates: I) -> usize
    where
        I: IntoIterator<Item = UnitRate>,
    {
        let mut added = 0;
        for r in rates {
            if self.insert(r) {
                added += 1;
            }
        }
        added
    }

    /// All slots in ascending order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<UnitRate> {
        self.rates.values().cloned().collect()
    }

    /// Iterate slots in ascending order without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &UnitRate> {
        self.rates.values()
    }

    /// Number of distinct slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the store holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<UnitRate> for RateStore {
    fn from_iter<I: IntoIterator<Item = UnitRate>>(iter: I) -> Self {
        let mut store = Self::new();
        store.merge_all(iter);
        store
    }
}
