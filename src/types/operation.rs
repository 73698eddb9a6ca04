//! Parsed replay operations
//!
//! This module defines the operation type produced by the CSV reader and
//! consumed by the replay driver. Each variant corresponds to one operation
//! the engine exposes; listing queries are not part of the replay stream
//! because the final report already covers them.

use super::item::{AccountId, ItemId};

/// One operation from the replay input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create an account with the given starting budget
    Register {
        username: String,
        email: String,
        budget: u64,
    },

    /// Create an unowned item listing at the given price
    ListItem {
        name: String,
        barcode: String,
        description: String,
        price: u64,
    },

    /// Buy an unowned item, debiting the buyer by the item price
    Purchase { account: AccountId, item: ItemId },

    /// Return an owned item to the market, crediting the seller
    Sell { account: AccountId, item: ItemId },
}
