//! CSV format handling for replay input and report output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to replay operations
//! - Account and item report serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{Account, AccountId, Item, ItemId, Operation};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the replay input format with columns:
/// `op,account,item,username,email,name,barcode,description,amount`
/// Every column except `op` is optional; which ones are required depends on
/// the operation. Empty fields deserialize to `None`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub account: Option<AccountId>,
    pub item: Option<ItemId>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub amount: Option<u64>,
}

/// Convert a CsvRecord to a replay Operation
///
/// This function:
/// - Matches the operation name case-insensitively
/// - Validates that the fields each operation requires are present
///   (`register` needs username/email/amount, `list_item` needs
///   name/barcode/amount, trades need account/item)
/// - Treats the `description` column as optional for `list_item`
///
/// # Arguments
///
/// * `record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(Operation) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(record: CsvRecord) -> Result<Operation, String> {
    let op = record.op.to_lowercase();
    match op.as_str() {
        "register" => {
            let username = record
                .username
                .ok_or("register requires a username".to_string())?;
            let email = record.email.ok_or("register requires an email".to_string())?;
            let budget = record
                .amount
                .ok_or_else(|| format!("register for '{}' requires a budget amount", username))?;
            Ok(Operation::Register {
                username,
                email,
                budget,
            })
        }
        "list_item" => {
            let name = record.name.ok_or("list_item requires a name".to_string())?;
            let barcode = record
                .barcode
                .ok_or_else(|| format!("list_item '{}' requires a barcode", name))?;
            let price = record
                .amount
                .ok_or_else(|| format!("list_item '{}' requires a price amount", name))?;
            Ok(Operation::ListItem {
                name,
                barcode,
                description: record.description.unwrap_or_default(),
                price,
            })
        }
        "purchase" | "sell" => {
            let account = record
                .account
                .ok_or_else(|| format!("{} requires an account id", op))?;
            let item = record
                .item
                .ok_or_else(|| format!("{} requires an item id", op))?;
            if op == "purchase" {
                Ok(Operation::Purchase { account, item })
            } else {
                Ok(Operation::Sell { account, item })
            }
        }
        _ => Err(format!("Invalid operation: '{}'", record.op)),
    }
}

/// Write account states to CSV format
///
/// Columns: `account,username,budget`. Callers pass accounts already sorted
/// by ID (the store guarantees this) so output is deterministic.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["account", "username", "budget"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for account in accounts {
        writer
            .write_record(&[
                account.id.to_string(),
                account.username.clone(),
                account.budget.to_string(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Write item states to CSV format
///
/// Columns: `item,name,price,owner`, where owner is either an account ID or
/// the literal `unowned`.
pub fn write_items_csv(items: &[Item], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["item", "name", "price", "owner"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for item in items {
        writer
            .write_record(&[
                item.id.to_string(),
                item.name.clone(),
                item.price.to_string(),
                item.owner.to_string(),
            ])
            .map_err(|e| format!("Failed to write item record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
