//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `item`: Item and ownership types
//! - `audit`: Audit trail records for committed trades
//! - `operation`: Parsed replay operations
//! - `error`: Error types for the market engine

pub mod account;
pub mod audit;
pub mod error;
pub mod item;
pub mod operation;

pub use account::Account;
pub use audit::{AuditRecord, TradeKind};
pub use error::{ErrorKind, MarketError};
pub use item::{AccountId, Item, ItemId, Owner, OwnerFilter};
pub use operation::Operation;
