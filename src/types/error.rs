//! Error types for the market engine
//!
//! This module defines all error types that can occur while processing
//! market operations. Errors are designed to be descriptive and safe to
//! show to callers, with the exception of storage faults which indicate
//! the atomicity contract may be at risk.
//!
//! # Error Categories
//!
//! - **NotFound**: A referenced account or item does not exist
//! - **Conflict**: An ownership precondition failed (already owned, not the
//!   owner, or a lost compare-and-set race)
//! - **PreconditionFailed**: A budget check rejected the operation
//! - **Duplicate**: A uniqueness constraint rejected a creation
//! - **Parse**: A malformed replay record was skipped
//! - **Storage**: A fault in the storage or I/O layer; fatal to the run

use crate::types::item::{AccountId, ItemId};
use thiserror::Error;

/// Coarse classification of a [`MarketError`]
///
/// Mirrors the propagation policy: everything except `Storage` is an
/// expected, recoverable outcome reported to the immediate caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    PreconditionFailed,
    Duplicate,
    Parse,
    Storage,
}

/// Main error type for the market engine
///
/// This enum represents all possible errors that can occur during market
/// operation processing. Each variant includes relevant context to help
/// diagnose and resolve the issue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    /// Referenced account does not exist
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The account ID that was not found
        account: AccountId,
    },

    /// Referenced item does not exist
    #[error("Item {item} not found")]
    ItemNotFound {
        /// The item ID that was not found
        item: ItemId,
    },

    /// Username already taken by another account
    #[error("Username '{username}' is already taken")]
    DuplicateUsername {
        /// The conflicting username
        username: String,
    },

    /// Email address already registered to another account
    #[error("Email address '{email}' is already registered")]
    DuplicateEmail {
        /// The conflicting email address
        email: String,
    },

    /// Item name already used by another listing
    #[error("Item name '{name}' is already listed")]
    DuplicateName {
        /// The conflicting item name
        name: String,
    },

    /// Barcode already used by another listing
    #[error("Barcode '{barcode}' is already listed")]
    DuplicateBarcode {
        /// The conflicting barcode
        barcode: String,
    },

    /// Purchase attempted on an item that already has an owner
    ///
    /// Also reported when a purchase loses the ownership race to a
    /// concurrent buyer.
    #[error("Item {item} is already owned by account {owner}")]
    ItemAlreadyOwned {
        /// The item ID
        item: ItemId,
        /// The current owner
        owner: AccountId,
    },

    /// Sale attempted by an account that is not the current owner
    ///
    /// Covers the case where the item is already unowned.
    #[error("Account {account} does not own item {item}")]
    NotOwner {
        /// The item ID
        item: ItemId,
        /// The account that attempted the sale
        account: AccountId,
    },

    /// Compare-and-set on the owner field observed a different current value
    ///
    /// Raised by the catalog's mutation primitive; the coordinator maps it
    /// to [`MarketError::ItemAlreadyOwned`] or [`MarketError::NotOwner`]
    /// before it reaches a caller.
    #[error("Ownership of item {item} changed concurrently")]
    OwnershipConflict {
        /// The item ID
        item: ItemId,
    },

    /// Buyer cannot afford the item price
    #[error("Insufficient funds for account {account}: budget {budget}, price {price}")]
    InsufficientFunds {
        /// The account ID
        account: AccountId,
        /// Budget at the time of the check
        budget: u64,
        /// Requested price
        price: u64,
    },

    /// Budget arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// The account ID
        account: AccountId,
    },

    /// Malformed replay record
    ///
    /// Recoverable: the record is skipped and processing continues.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// I/O error while reading input or writing the report
    ///
    /// Fatal to the run.
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A mutation the coordinator believed committed could not be applied
    /// or reconciled
    ///
    /// Fatal to the operation and surfaced distinctly from business-rule
    /// failures; requires operator attention rather than caller retry.
    #[error("Storage fault: {message}")]
    StorageFault {
        /// Description of the fault
        message: String,
    },
}

impl MarketError {
    /// Classify this error into the coarse taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::AccountNotFound { .. } | MarketError::ItemNotFound { .. } => {
                ErrorKind::NotFound
            }
            MarketError::ItemAlreadyOwned { .. }
            | MarketError::NotOwner { .. }
            | MarketError::OwnershipConflict { .. } => ErrorKind::Conflict,
            MarketError::InsufficientFunds { .. } | MarketError::ArithmeticOverflow { .. } => {
                ErrorKind::PreconditionFailed
            }
            MarketError::DuplicateUsername { .. }
            | MarketError::DuplicateEmail { .. }
            | MarketError::DuplicateName { .. }
            | MarketError::DuplicateBarcode { .. } => ErrorKind::Duplicate,
            MarketError::ParseError { .. } => ErrorKind::Parse,
            MarketError::IoError { .. } | MarketError::StorageFault { .. } => ErrorKind::Storage,
        }
    }

    /// True if this error indicates the run should stop
    ///
    /// Business-rule failures are reported per operation and processing
    /// continues; storage-class errors abort.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Storage
    }
}

// Conversion from io::Error to MarketError
impl From<std::io::Error> for MarketError {
    fn from(error: std::io::Error) -> Self {
        MarketError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to MarketError
impl From<csv::Error> for MarketError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        MarketError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl MarketError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        MarketError::AccountNotFound { account }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(item: ItemId) -> Self {
        MarketError::ItemNotFound { item }
    }

    /// Create an ItemAlreadyOwned error
    pub fn item_already_owned(item: ItemId, owner: AccountId) -> Self {
        MarketError::ItemAlreadyOwned { item, owner }
    }

    /// Create a NotOwner error
    pub fn not_owner(item: ItemId, account: AccountId) -> Self {
        MarketError::NotOwner { item, account }
    }

    /// Create an OwnershipConflict error
    pub fn ownership_conflict(item: ItemId) -> Self {
        MarketError::OwnershipConflict { item }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, budget: u64, price: u64) -> Self {
        MarketError::InsufficientFunds {
            account,
            budget,
            price,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        MarketError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create a StorageFault error
    pub fn storage_fault(message: impl Into<String>) -> Self {
        MarketError::StorageFault {
            message: message.into(),
        }
    }
}
