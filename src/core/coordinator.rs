//! Transaction coordination for purchases and sales
//!
//! This module provides the `TransactionCoordinator`, the only component
//! allowed to mutate the account store and the item catalog together. It
//! implements `purchase` and `sell` as atomic operations per item.
//!
//! # Atomicity discipline
//!
//! Both operations follow the optimistic compare-and-set scheme:
//!
//! 1. Validate every precondition against stable snapshots (item exists,
//!    account exists, ownership state, budget covers the price).
//! 2. Claim the ownership transition with a CAS on the item's owner field.
//!    A lost race fails here, immediately, with no side effects.
//! 3. Apply the budget adjustment under the account's entry lock.
//! 4. If the adjustment still fails (a concurrent trade on the same account
//!    moved the budget between the snapshot and now), compensate by
//!    reversing the ownership CAS before reporting the failure.
//!
//! The CAS is the serialization point for each item; the account entry lock
//! is the serialization point for each budget. Neither store lock is held
//! while the other is taken, so there is no lock-ordering concern and no
//! operation ever blocks waiting for a competing trade.

use crate::core::account_store::AccountStore;
use crate::core::audit_log::AuditLog;
use crate::core::item_catalog::ItemCatalog;
use crate::types::{AccountId, AuditRecord, ItemId, MarketError, Owner, TradeKind};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Result of a committed purchase or sale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeReceipt {
    /// The buying or selling account
    pub account: AccountId,

    /// The traded item
    pub item: ItemId,

    /// The account budget after the trade
    pub new_budget: u64,

    /// The item's owner after the trade
    pub new_owner: Owner,
}

/// Coordinates atomic ownership and budget transfers
///
/// Holds shared handles to the two stores and the audit log. All methods
/// take `&self`; the coordinator itself is stateless between calls and can
/// be shared freely across threads.
pub struct TransactionCoordinator {
    accounts: Arc<AccountStore>,
    catalog: Arc<ItemCatalog>,
    audit: Arc<AuditLog>,
}

impl TransactionCoordinator {
    /// Create a coordinator over the given stores
    pub fn new(
        accounts: Arc<AccountStore>,
        catalog: Arc<ItemCatalog>,
        audit: Arc<AuditLog>,
    ) -> Self {
        TransactionCoordinator {
            accounts,
            catalog,
            audit,
        }
    }

    /// Purchase an unowned item
    ///
    /// On success the item transitions to `Owned(buyer)` and the buyer is
    /// debited by the item price, atomically: no observer ever sees one
    /// without the other surviving.
    ///
    /// # Arguments
    ///
    /// * `buyer` - The purchasing account
    /// * `item_id` - The item to purchase
    ///
    /// # Returns
    ///
    /// * `Ok(TradeReceipt)` - The buyer's new budget and the new owner
    /// * `Err(MarketError)` - If any precondition fails
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `ItemNotFound` if the item does not exist
    /// - `AccountNotFound` if the buyer does not exist
    /// - `ItemAlreadyOwned` if the item has an owner (including losing the
    ///   ownership race to a concurrent buyer)
    /// - `InsufficientFunds` if the buyer's budget does not cover the price
    ///
    /// A failure before the ownership CAS has no side effects; a caller may
    /// retry with fresh information.
    pub fn purchase(&self, buyer: AccountId, item_id: ItemId) -> Result<TradeReceipt, MarketError> {
        let item = self.catalog.get(item_id)?;
        let account = self.accounts.get(buyer)?;

        if let Owner::Owned(owner) = item.owner {
            return Err(MarketError::item_already_owned(item_id, owner));
        }
        if account.budget < item.price {
            return Err(MarketError::insufficient_funds(
                buyer,
                account.budget,
                item.price,
            ));
        }
        let debit = i64::try_from(item.price)
            .map_err(|_| MarketError::arithmetic_overflow("debit", buyer))?;

        // Serialization point: claim the item before touching the budget
        self.catalog
            .set_owner(item_id, Owner::Unowned, Owner::Owned(buyer))
            .map_err(|err| self.map_purchase_conflict(item_id, err))?;

        match self.accounts.adjust_budget(buyer, -debit) {
            Ok(new_budget) => {
                self.record_trade(
                    item_id,
                    Owner::Unowned,
                    Owner::Owned(buyer),
                    item.price,
                    TradeKind::Purchase,
                );
                Ok(TradeReceipt {
                    account: buyer,
                    item: item_id,
                    new_budget,
                    new_owner: Owner::Owned(buyer),
                })
            }
            Err(err) => {
                // A concurrent trade drained the budget between the snapshot
                // and the debit. Compensate: release the claim before
                // reporting, so no partial state survives.
                self.catalog
                    .set_owner(item_id, Owner::Owned(buyer), Owner::Unowned)
                    .map_err(|_| {
                        MarketError::storage_fault(format!(
                            "could not release item {} after failed debit for account {}",
                            item_id, buyer
                        ))
                    })?;
                Err(err)
            }
        }
    }

    /// Sell an owned item back to the market
    ///
    /// On success the item transitions to `Unowned` and the seller is
    /// credited by the item price, atomically.
    ///
    /// # Arguments
    ///
    /// * `seller` - The account selling the item; must be the current owner
    /// * `item_id` - The item to sell
    ///
    /// # Returns
    ///
    /// * `Ok(TradeReceipt)` - The seller's new budget and the new owner
    /// * `Err(MarketError)` - If any precondition fails
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `ItemNotFound` if the item does not exist
    /// - `AccountNotFound` if the seller does not exist
    /// - `NotOwner` if the current owner differs from the seller, including
    ///   when the item is already unowned
    pub fn sell(&self, seller: AccountId, item_id: ItemId) -> Result<TradeReceipt, MarketError> {
        let item = self.catalog.get(item_id)?;
        self.accounts.get(seller)?;

        if item.owner != Owner::Owned(seller) {
            return Err(MarketError::not_owner(item_id, seller));
        }
        let credit = i64::try_from(item.price)
            .map_err(|_| MarketError::arithmetic_overflow("credit", seller))?;

        self.catalog
            .set_owner(item_id, Owner::Owned(seller), Owner::Unowned)
            .map_err(|err| match err {
                MarketError::OwnershipConflict { .. } => {
                    MarketError::not_owner(item_id, seller)
                }
                other => other,
            })?;

        match self.accounts.adjust_budget(seller, credit) {
            Ok(new_budget) => {
                self.record_trade(
                    item_id,
                    Owner::Owned(seller),
                    Owner::Unowned,
                    item.price,
                    TradeKind::Sale,
                );
                Ok(TradeReceipt {
                    account: seller,
                    item: item_id,
                    new_budget,
                    new_owner: Owner::Unowned,
                })
            }
            Err(err) => {
                // Credit overflow: restore ownership before reporting
                self.catalog
                    .set_owner(item_id, Owner::Unowned, Owner::Owned(seller))
                    .map_err(|_| {
                        MarketError::storage_fault(format!(
                            "could not restore owner of item {} after failed credit for account {}",
                            item_id, seller
                        ))
                    })?;
                Err(err)
            }
        }
    }

    /// Translate a lost purchase CAS into the caller-facing error
    ///
    /// The catalog reports a bare `OwnershipConflict`; the caller was
    /// promised `ItemAlreadyOwned` with the winning owner where one is
    /// visible.
    fn map_purchase_conflict(&self, item_id: ItemId, err: MarketError) -> MarketError {
        match err {
            MarketError::OwnershipConflict { .. } => match self.catalog.get(item_id) {
                Ok(current) => match current.owner {
                    Owner::Owned(owner) => MarketError::item_already_owned(item_id, owner),
                    // The winner already resold; the race is still a conflict
                    Owner::Unowned => MarketError::ownership_conflict(item_id),
                },
                Err(err) => err,
            },
            other => other,
        }
    }

    /// Append an audit record for a committed trade
    ///
    /// Called strictly after both mutations have applied. An append failure
    /// is surfaced as a warning only; the trade stays committed.
    fn record_trade(
        &self,
        item: ItemId,
        from_owner: Owner,
        to_owner: Owner,
        price: u64,
        kind: TradeKind,
    ) {
        let record = AuditRecord {
            item,
            from_owner,
            to_owner,
            price,
            timestamp_ms: now_ms(),
            kind,
        };
        if let Err(err) = self.audit.append(record) {
            eprintln!("Warning: failed to record committed trade: {}", err);
        }
    }
}

/// Milliseconds since the Unix epoch
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
