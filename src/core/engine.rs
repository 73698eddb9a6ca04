//! Market engine facade
//!
//! This module provides the `MarketEngine` that bundles the account store,
//! the item catalog, the transaction coordinator, and the audit log behind
//! the operation surface the request layer consumes: create account, create
//! item, list, purchase, sell.
//!
//! The engine is transport-agnostic: every method is a plain call with a
//! typed result, so the whole system can be driven directly from tests or
//! from the CSV replay binary without any web framework in between.

use crate::core::account_store::AccountStore;
use crate::core::audit_log::AuditLog;
use crate::core::coordinator::{TradeReceipt, TransactionCoordinator};
use crate::core::item_catalog::ItemCatalog;
use crate::types::{
    Account, AccountId, AuditRecord, Item, ItemId, MarketError, OwnerFilter,
};
use std::sync::Arc;

/// Facade over the market stores and the transaction coordinator
///
/// All methods take `&self`; an engine wrapped in `Arc` can be shared
/// across threads and every exposed operation stays linearizable per item
/// and per account budget.
pub struct MarketEngine {
    accounts: Arc<AccountStore>,
    catalog: Arc<ItemCatalog>,
    audit: Arc<AuditLog>,
    coordinator: TransactionCoordinator,
}

impl MarketEngine {
    /// Create a new engine with empty stores
    pub fn new() -> Self {
        let accounts = Arc::new(AccountStore::new());
        let catalog = Arc::new(ItemCatalog::new());
        let audit = Arc::new(AuditLog::new());
        let coordinator = TransactionCoordinator::new(
            Arc::clone(&accounts),
            Arc::clone(&catalog),
            Arc::clone(&audit),
        );
        MarketEngine {
            accounts,
            catalog,
            audit,
            coordinator,
        }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` or `DuplicateEmail` if either value is
    /// already registered.
    pub fn create_account(
        &self,
        username: &str,
        email: &str,
        initial_budget: u64,
    ) -> Result<AccountId, MarketError> {
        self.accounts.create(username, email, initial_budget)
    }

    /// List a new unowned item
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` or `DuplicateBarcode` if either value is
    /// already listed.
    pub fn create_item(
        &self,
        name: &str,
        barcode: &str,
        description: &str,
        price: u64,
    ) -> Result<ItemId, MarketError> {
        self.catalog.create(name, barcode, description, price)
    }

    /// Get a snapshot of one account
    pub fn account(&self, id: AccountId) -> Result<Account, MarketError> {
        self.accounts.get(id)
    }

    /// Get a snapshot of one item
    pub fn item(&self, id: ItemId) -> Result<Item, MarketError> {
        self.catalog.get(id)
    }

    /// Items currently listed on the open market
    pub fn unowned_items(&self) -> Vec<Item> {
        self.catalog.list(OwnerFilter::Unowned)
    }

    /// Items currently owned by the given account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist; an existing
    /// account that owns nothing yields an empty list.
    pub fn owned_items(&self, account: AccountId) -> Result<Vec<Item>, MarketError> {
        if !self.accounts.contains(account) {
            return Err(MarketError::account_not_found(account));
        }
        Ok(self.catalog.list(OwnerFilter::OwnedBy(account)))
    }

    /// Purchase an unowned item for the given account
    ///
    /// See [`TransactionCoordinator::purchase`] for the precondition order
    /// and atomicity contract.
    pub fn purchase(&self, account: AccountId, item: ItemId) -> Result<TradeReceipt, MarketError> {
        self.coordinator.purchase(account, item)
    }

    /// Sell an owned item for the given account
    ///
    /// See [`TransactionCoordinator::sell`].
    pub fn sell(&self, account: AccountId, item: ItemId) -> Result<TradeReceipt, MarketError> {
        self.coordinator.sell(account, item)
    }

    /// Snapshots of all accounts sorted by ID
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.accounts()
    }

    /// Snapshots of all items sorted by ID
    pub fn items(&self) -> Vec<Item> {
        self.catalog.list(OwnerFilter::Any)
    }

    /// All committed trades in commit order
    pub fn audit_records(&self) -> Vec<AuditRecord> {
        self.audit.records()
    }
}

impl Default for MarketEngine {
    fn default() -> Self {
        Self::new()
    }
}
