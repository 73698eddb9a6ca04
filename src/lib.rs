//! Market Engine Library
//! # Overview
//!
//! This library provides an atomic marketplace exchange engine: ownership of
//! tradeable items is transferred between accounts while bounded budgets are
//! debited and credited, with a guarantee that ownership and currency are
//! never observed in an inconsistent intermediate state, even under
//! concurrent requests for the same item.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Item, Owner, AuditRecord, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::account_store`] - Account state and budget operations
//!   - [`core::item_catalog`] - Item listings with compare-and-set ownership
//!   - [`core::coordinator`] - Atomic purchase/sell orchestration
//!   - [`core::audit_log`] - Append-only record of committed trades
//!   - [`core::engine`] - Facade exposing the full operation surface
//! - [`io`] - CSV replay input and report output
//! - [`replay`] - The replay driver wiring I/O to the engine
//!
//! # Operations
//!
//! The engine exposes six operations:
//!
//! - **CreateAccount**: Register a participant with a starting budget
//! - **CreateItem**: List an unowned item at a fixed price
//! - **ListUnownedItems** / **ListOwnedItems**: Snapshot queries
//! - **Purchase**: Atomically transfer an unowned item to a buyer and debit
//!   the price
//! - **Sell**: Atomically return an owned item to the market and credit the
//!   seller
//!
//! # Concurrency
//!
//! Operations on the same item are linearized by a compare-and-set on the
//! item's owner field; operations on the same budget are linearized by the
//! account entry lock. Failed attempts return immediately with a typed
//! conflict instead of queuing.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod replay;
pub mod types;

pub use core::{AccountStore, AuditLog, ItemCatalog, MarketEngine, TradeReceipt, TransactionCoordinator};
pub use io::{write_accounts_csv, write_items_csv};
pub use types::{
    Account, AccountId, AuditRecord, ErrorKind, Item, ItemId, MarketError, Operation, Owner,
    OwnerFilter, TradeKind,
};
