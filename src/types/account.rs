//! Account-related types for the market engine
//!
//! This module defines the Account structure representing a registered
//! market participant and their currency balance.

use super::item::AccountId;

/// Registered market participant
///
/// Represents a snapshot of an account's state. Instances returned from the
/// store are detached copies; mutations only happen through the store's own
/// operations, never through a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique account identifier, immutable after creation
    pub id: AccountId,

    /// Unique username (case-sensitive exact match)
    pub username: String,

    /// Unique email address (case-sensitive exact match)
    pub email: String,

    /// Current balance in abstract currency units
    ///
    /// Always non-negative. Mutated only by the transaction coordinator
    /// through budget adjustments that reject any result below zero.
    pub budget: u64,
}

impl Account {
    /// Create a new account snapshot
    ///
    /// # Arguments
    ///
    /// * `id` - The unique account identifier
    /// * `username` - The unique username
    /// * `email` - The unique email address
    /// * `budget` - The initial balance
    pub fn new(id: AccountId, username: impl Into<String>, email: impl Into<String>, budget: u64) -> Self {
        Account {
            id,
            username: username.into(),
            email: email.into(),
            budget,
        }
    }

    /// Check whether this account could afford the given price
    ///
    /// This is a read-side convenience only; the authoritative check happens
    /// inside the budget adjustment under the store's entry lock.
    pub fn can_afford(&self, price: u64) -> bool {
        self.budget >= price
    }
}
