//! Account storage and budget operations
//!
//! This module provides the `AccountStore` struct which maintains the state
//! of all registered accounts and provides budget mutation operations.
//!
//! # Design
//!
//! Accounts live in a `DashMap` keyed by account ID, giving fine-grained
//! per-entry locking: operations on different accounts never block each
//! other, while a budget adjustment holds the entry lock for its account so
//! concurrent adjustments to the same budget are linearized.
//!
//! Username and email uniqueness is enforced through two index maps that are
//! claimed before the account record is inserted. ID allocation is a simple
//! atomic counter; a creation that loses a uniqueness race burns its ID,
//! leaving a gap, which is harmless because IDs only need to be unique and
//! monotonic.

use crate::types::{Account, AccountId, MarketError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe store of all registered accounts
///
/// All methods take `&self`; interior mutability comes from the `DashMap`
/// entries. Reads return detached snapshots, never live references, so a
/// caller can never observe or produce a partially-updated account.
#[derive(Debug, Default)]
pub struct AccountStore {
    /// Map of account IDs to account state
    accounts: DashMap<AccountId, Account>,

    /// Uniqueness index: username to account ID
    by_username: DashMap<String, AccountId>,

    /// Uniqueness index: email address to account ID
    by_email: DashMap<String, AccountId>,

    /// Last allocated account ID; IDs start at 1
    next_id: AtomicU32,
}

impl AccountStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new account
    ///
    /// Claims the username index first and the email index second; if the
    /// email claim fails the username claim is released, so a failed
    /// creation leaves no trace beyond the burned ID.
    ///
    /// # Arguments
    ///
    /// * `username` - Unique username (case-sensitive exact match)
    /// * `email` - Unique email address (case-sensitive exact match)
    /// * `initial_budget` - Starting balance
    ///
    /// # Returns
    ///
    /// * `Ok(AccountId)` - The ID of the newly created account
    /// * `Err(MarketError)` - If the username or email is already taken
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` or `DuplicateEmail` if either value is
    /// already registered, checked in that order.
    pub fn create(
        &self,
        username: &str,
        email: &str,
        initial_budget: u64,
    ) -> Result<AccountId, MarketError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        match self.by_username.entry(username.to_string()) {
            Entry::Occupied(_) => {
                return Err(MarketError::DuplicateUsername {
                    username: username.to_string(),
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
        }

        match self.by_email.entry(email.to_string()) {
            Entry::Occupied(_) => {
                // Release the username claim before reporting the failure
                self.by_username.remove(username);
                return Err(MarketError::DuplicateEmail {
                    email: email.to_string(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
        }

        self.accounts
            .insert(id, Account::new(id, username, email, initial_budget));
        Ok(id)
    }

    /// Get a snapshot of an account
    ///
    /// # Arguments
    ///
    /// * `id` - The account ID to look up
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - A detached copy of the account state
    /// * `Err(MarketError)` - `AccountNotFound` if the ID is unknown
    pub fn get(&self, id: AccountId) -> Result<Account, MarketError> {
        self.accounts
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| MarketError::account_not_found(id))
    }

    /// Check whether an account exists
    pub fn contains(&self, id: AccountId) -> bool {
        self.accounts.contains_key(&id)
    }

    /// Apply a signed delta to an account budget
    ///
    /// The check and the write happen while holding the entry lock for the
    /// account, so concurrent adjustments to the same budget are linearized
    /// and `budget >= 0` is never violated, not even transiently.
    ///
    /// # Arguments
    ///
    /// * `id` - The account ID to adjust
    /// * `delta` - Amount to add (positive) or remove (negative)
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - The new budget after the adjustment
    /// * `Err(MarketError)` - If the account is unknown, the result would be
    ///   negative, or the addition would overflow
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist (`AccountNotFound`)
    /// - A debit exceeds the current budget (`InsufficientFunds`)
    /// - A credit would overflow the budget (`ArithmeticOverflow`)
    pub fn adjust_budget(&self, id: AccountId, delta: i64) -> Result<u64, MarketError> {
        let mut entry = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| MarketError::account_not_found(id))?;
        let account = entry.value_mut();

        let new_budget = if delta >= 0 {
            account
                .budget
                .checked_add(delta as u64)
                .ok_or_else(|| MarketError::arithmetic_overflow("credit", id))?
        } else {
            let debit = delta.unsigned_abs();
            if account.budget < debit {
                return Err(MarketError::insufficient_funds(id, account.budget, debit));
            }
            account.budget - debit
        };

        account.budget = new_budget;
        Ok(new_budget)
    }

    /// Get snapshots of all accounts sorted by ID
    ///
    /// Sorted output keeps report generation deterministic. The result is a
    /// point-in-time snapshot; accounts created or adjusted afterwards are
    /// not reflected.
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|account| account.id);
        accounts
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True if no accounts are registered
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = AccountStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.accounts().is_empty());
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = AccountStore::new();

        let a = store.create("alice", "alice@example.com", 1000).unwrap();
        let b = store.create("bob", "bob@example.com", 500).unwrap();

        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_rejects_duplicate_username() {
        let store = AccountStore::new();
        store.create("alice", "alice@example.com", 1000).unwrap();

        let result = store.create("alice", "other@example.com", 1000);

        assert!(matches!(
            result.unwrap_err(),
            MarketError::DuplicateUsername { .. }
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_rejects_duplicate_email() {
        let store = AccountStore::new();
        store.create("alice", "alice@example.com", 1000).unwrap();

        let result = store.create("bob", "alice@example.com", 1000);

        assert!(matches!(
            result.unwrap_err(),
            MarketError::DuplicateEmail { .. }
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_email_claim_releases_username() {
        let store = AccountStore::new();
        store.create("alice", "alice@example.com", 1000).unwrap();

        // Fails on the email, so the username must remain available
        let failed = store.create("bob", "alice@example.com", 1000);
        assert!(failed.is_err());

        let retried = store.create("bob", "bob@example.com", 1000);
        assert!(retried.is_ok());
    }

    #[test]
    fn test_username_matching_is_case_sensitive() {
        let store = AccountStore::new();
        store.create("alice", "alice@example.com", 1000).unwrap();

        // Exact-match uniqueness: a different casing is a different name
        let result = store.create("Alice", "alice2@example.com", 1000);
        assert!(result.is_ok());
    }

    #[test]
    fn test_get_returns_snapshot() {
        let store = AccountStore::new();
        let id = store.create("alice", "alice@example.com", 1000).unwrap();

        let snapshot = store.get(id).unwrap();
        assert_eq!(snapshot.username, "alice");
        assert_eq!(snapshot.budget, 1000);

        // Mutating the store must not be visible through the old snapshot
        store.adjust_budget(id, -300).unwrap();
        assert_eq!(snapshot.budget, 1000);
        assert_eq!(store.get(id).unwrap().budget, 700);
    }

    #[test]
    fn test_get_unknown_account_fails() {
        let store = AccountStore::new();
        assert!(matches!(
            store.get(99).unwrap_err(),
            MarketError::AccountNotFound { account: 99 }
        ));
    }

    #[test]
    fn test_adjust_budget_credit_and_debit() {
        let store = AccountStore::new();
        let id = store.create("alice", "alice@example.com", 1000).unwrap();

        assert_eq!(store.adjust_budget(id, 500).unwrap(), 1500);
        assert_eq!(store.adjust_budget(id, -1500).unwrap(), 0);
    }

    #[test]
    fn test_adjust_budget_rejects_negative_result() {
        let store = AccountStore::new();
        let id = store.create("alice", "alice@example.com", 100).unwrap();

        let result = store.adjust_budget(id, -101);

        assert!(matches!(
            result.unwrap_err(),
            MarketError::InsufficientFunds {
                account: 1,
                budget: 100,
                price: 101
            }
        ));
        // Budget unchanged after a rejected debit
        assert_eq!(store.get(id).unwrap().budget, 100);
    }

    #[test]
    fn test_adjust_budget_allows_exact_drain() {
        let store = AccountStore::new();
        let id = store.create("alice", "alice@example.com", 100).unwrap();

        assert_eq!(store.adjust_budget(id, -100).unwrap(), 0);
    }

    #[test]
    fn test_adjust_budget_overflow_is_rejected() {
        let store = AccountStore::new();
        let id = store.create("alice", "alice@example.com", u64::MAX).unwrap();

        let result = store.adjust_budget(id, 1);

        assert!(matches!(
            result.unwrap_err(),
            MarketError::ArithmeticOverflow { .. }
        ));
        assert_eq!(store.get(id).unwrap().budget, u64::MAX);
    }

    #[test]
    fn test_adjust_budget_unknown_account_fails() {
        let store = AccountStore::new();
        assert!(matches!(
            store.adjust_budget(7, 10).unwrap_err(),
            MarketError::AccountNotFound { account: 7 }
        ));
    }

    #[test]
    fn test_accounts_sorted_by_id() {
        let store = AccountStore::new();
        store.create("carol", "carol@example.com", 1).unwrap();
        store.create("alice", "alice@example.com", 2).unwrap();
        store.create("bob", "bob@example.com", 3).unwrap();

        let ids: Vec<AccountId> = store.accounts().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_concurrent_adjustments_same_account() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(AccountStore::new());
        let id = store.create("alice", "alice@example.com", 0).unwrap();

        let mut handles = vec![];
        for _ in 0..100 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store.adjust_budget(id, 10).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(id).unwrap().budget, 1000);
    }

    #[test]
    fn test_concurrent_debits_never_go_negative() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(AccountStore::new());
        let id = store.create("alice", "alice@example.com", 50).unwrap();

        // 100 threads each try to debit 10; only 5 can succeed
        let mut handles = vec![];
        for _ in 0..100 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || store.adjust_budget(id, -10).is_ok()));
        }

        let successes: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();

        assert_eq!(successes, 5);
        assert_eq!(store.get(id).unwrap().budget, 0);
    }

    #[test]
    fn test_concurrent_creates_unique_usernames() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(AccountStore::new());

        // 10 threads race to register the same username
        let mut handles = vec![];
        for i in 0..10 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store
                    .create("alice", &format!("alice{}@example.com", i), 100)
                    .is_ok()
            }));
        }

        let successes: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }
}
