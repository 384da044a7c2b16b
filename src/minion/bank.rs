//! Item multiset ("bank") used for player holdings and per-trip loot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::minion::types::ItemId;

/// A multiset of item id -> held quantity. Counts are never negative;
/// removing more than is held clamps to zero. BTreeMap keeps iteration
/// order stable so formatted output and tests are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    items: BTreeMap<ItemId, u64>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of an item. Chainable so loot tables read naturally.
    pub fn add(&mut self, item: ItemId, quantity: u64) -> &mut Self {
        if quantity > 0 {
            *self.items.entry(item).or_insert(0) += quantity;
        }
        self
    }

    /// Merge another bank into this one, summing counts per item.
    pub fn add_bank(&mut self, other: &Bank) -> &mut Self {
        for (item, quantity) in other.iter() {
            self.add(item, quantity);
        }
        self
    }

    /// Remove up to `quantity` of an item, returning how many were removed.
    pub fn remove(&mut self, item: ItemId, quantity: u64) -> u64 {
        match self.items.get_mut(&item) {
            Some(held) => {
                let removed = quantity.min(*held);
                *held -= removed;
                if *held == 0 {
                    self.items.remove(&item);
                }
                removed
            }
            None => 0,
        }
    }

    /// Quantity held of a single item (zero when absent).
    pub fn amount(&self, item: ItemId) -> u64 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: ItemId) -> bool {
        self.amount(item) > 0
    }

    /// Number of distinct items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u64)> + '_ {
        self.items.iter().map(|(id, qty)| (*id, *qty))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
