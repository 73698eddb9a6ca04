//! Core business logic module
//!
//! This module contains the core market components:
//! - `account_store` - Account state and budget operations
//! - `item_catalog` - Item listings and compare-and-set ownership
//! - `coordinator` - Atomic purchase/sell orchestration
//! - `audit_log` - Append-only record of committed trades
//! - `engine` - Facade bundling the above behind the operation surface

pub mod account_store;
pub mod audit_log;
pub mod coordinator;
pub mod engine;
pub mod item_catalog;

pub use account_store::AccountStore;
pub use audit_log::AuditLog;
pub use coordinator::{TradeReceipt, TransactionCoordinator};
pub use engine::MarketEngine;
pub use item_catalog::ItemCatalog;
