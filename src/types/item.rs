//! Item and ownership types for the market engine
//!
//! This module defines the Item structure, the Owner state used for
//! compare-and-set ownership transitions, and the filter applied to
//! catalog listings.

use std::fmt;

/// Account identifier
///
/// Supports account IDs from 1 to 4,294,967,295 (0 is never allocated)
pub type AccountId = u32;

/// Item identifier
///
/// Supports item IDs from 1 to 4,294,967,295 (0 is never allocated)
pub type ItemId = u32;

/// Ownership state of an item
///
/// An item is either unowned (listed on the open market) or owned by exactly
/// one account. This is an explicit state rather than an optional foreign
/// key so compare-and-set arguments are self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// No current owner; the item can be purchased
    Unowned,

    /// Owned by the given account; the item can only be sold by that account
    Owned(AccountId),
}

impl Owner {
    /// True if the item has no current owner
    pub fn is_unowned(&self) -> bool {
        matches!(self, Owner::Unowned)
    }

    /// The owning account ID, if any
    pub fn account(&self) -> Option<AccountId> {
        match self {
            Owner::Unowned => None,
            Owner::Owned(id) => Some(*id),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Unowned => write!(f, "unowned"),
            Owner::Owned(id) => write!(f, "{}", id),
        }
    }
}

/// Filter for catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerFilter {
    /// Only items with no current owner
    Unowned,

    /// Only items owned by the given account
    OwnedBy(AccountId),

    /// All items regardless of ownership
    Any,
}

impl OwnerFilter {
    /// Check whether an ownership state passes this filter
    pub fn matches(&self, owner: Owner) -> bool {
        match self {
            OwnerFilter::Unowned => owner.is_unowned(),
            OwnerFilter::OwnedBy(id) => owner == Owner::Owned(*id),
            OwnerFilter::Any => true,
        }
    }
}

/// Tradeable market listing
///
/// Represents a snapshot of an item's state. Everything except `owner` is
/// write-once at creation; the owner field transitions between `Unowned`
/// and `Owned` exclusively through the catalog's compare-and-set operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique item identifier, immutable after creation
    pub id: ItemId,

    /// Unique item name
    pub name: String,

    /// Unique barcode string
    pub barcode: String,

    /// Free-form description, not part of any uniqueness check
    pub description: String,

    /// Listing price in abstract currency units, immutable once listed
    pub price: u64,

    /// Current ownership state
    pub owner: Owner,
}

impl Item {
    /// Create a new unowned item snapshot
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        barcode: impl Into<String>,
        description: impl Into<String>,
        price: u64,
    ) -> Self {
        Item {
            id,
            name: name.into(),
            barcode: barcode.into(),
            description: description.into(),
            price,
            owner: Owner::Unowned,
        }
    }
}
