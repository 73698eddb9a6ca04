//! Item catalog with compare-and-set ownership
//!
//! This module provides the `ItemCatalog` struct which maintains all market
//! listings. Its only mutation primitive after creation is `set_owner`, a
//! compare-and-set on the owner field, which is the serialization point for
//! every ownership transition in the system.
//!
//! # Design
//!
//! Items live in a `DashMap` keyed by item ID. `set_owner` performs its
//! compare and its write while holding the entry lock for the item, which is
//! what makes it a true compare-and-set: two concurrent transitions for the
//! same item observe each other's effects in some total order and at most
//! one of them can win a race from the same expected state.

use crate::types::{Item, ItemId, MarketError, Owner, OwnerFilter};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe catalog of all market listings
///
/// Reads return detached snapshots; a snapshot handed out earlier never
/// reflects later mutations. Name and barcode uniqueness is enforced through
/// index maps claimed before the item record is inserted, the same way the
/// account store claims usernames.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    /// Map of item IDs to item state
    items: DashMap<ItemId, Item>,

    /// Uniqueness index: item name to item ID
    by_name: DashMap<String, ItemId>,

    /// Uniqueness index: barcode to item ID
    by_barcode: DashMap<String, ItemId>,

    /// Last allocated item ID; IDs start at 1
    next_id: AtomicU32,
}

impl ItemCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new unowned listing
    ///
    /// # Arguments
    ///
    /// * `name` - Unique item name
    /// * `barcode` - Unique barcode string
    /// * `description` - Free-form description
    /// * `price` - Listing price, immutable once listed
    ///
    /// # Returns
    ///
    /// * `Ok(ItemId)` - The ID of the newly listed item
    /// * `Err(MarketError)` - If the name or barcode is already listed
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` or `DuplicateBarcode` if either value is
    /// already in use, checked in that order.
    pub fn create(
        &self,
        name: &str,
        barcode: &str,
        description: &str,
        price: u64,
    ) -> Result<ItemId, MarketError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        match self.by_name.entry(name.to_string()) {
            Entry::Occupied(_) => {
                return Err(MarketError::DuplicateName {
                    name: name.to_string(),
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
        }

        match self.by_barcode.entry(barcode.to_string()) {
            Entry::Occupied(_) => {
                self.by_name.remove(name);
                return Err(MarketError::DuplicateBarcode {
                    barcode: barcode.to_string(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
        }

        self.items
            .insert(id, Item::new(id, name, barcode, description, price));
        Ok(id)
    }

    /// Get a snapshot of an item
    ///
    /// # Returns
    ///
    /// * `Ok(Item)` - A detached copy of the item state
    /// * `Err(MarketError)` - `ItemNotFound` if the ID is unknown
    pub fn get(&self, id: ItemId) -> Result<Item, MarketError> {
        self.items
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| MarketError::item_not_found(id))
    }

    /// List item snapshots matching an ownership filter, sorted by ID
    ///
    /// Each call re-reads current state; a previously returned sequence is a
    /// snapshot, not a live view. Values that were never committed are never
    /// visible here because every mutation happens under an entry lock.
    pub fn list(&self, filter: OwnerFilter) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .filter(|entry| filter.matches(entry.value().owner))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// Compare-and-set the owner of an item
    ///
    /// Succeeds only if the item's current owner equals `expected`. The
    /// compare and the write happen under the item's entry lock, so a
    /// successful call is the single point at which the ownership
    /// transition becomes visible. A failed call has no side effects and
    /// returns immediately; it never queues or blocks on a retry.
    ///
    /// # Arguments
    ///
    /// * `id` - The item to transition
    /// * `expected` - The owner the caller believes is current
    /// * `new` - The owner to install
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The transition was applied
    /// * `Err(MarketError)` - `ItemNotFound` for an unknown item, or
    ///   `OwnershipConflict` if the current owner differs from `expected`
    pub fn set_owner(
        &self,
        id: ItemId,
        expected: Owner,
        new: Owner,
    ) -> Result<(), MarketError> {
        let mut entry = self
            .items
            .get_mut(&id)
            .ok_or_else(|| MarketError::item_not_found(id))?;
        let item = entry.value_mut();

        if item.owner != expected {
            return Err(MarketError::ownership_conflict(id));
        }

        item.owner = new;
        Ok(())
    }

    /// Number of listings
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is listed
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
