//! CSV replay driver
//!
//! Replays an operation log through a fresh engine and writes a final state
//! report. This is the runnable surface of the crate; the engine itself
//! stays transport-agnostic.
//!
//! # Error policy
//!
//! Malformed records and rejected operations are recoverable: they are
//! logged to stderr and skipped, and processing continues with the next
//! record. Only storage-class failures (unreadable input, unwritable
//! output) abort the run.

use crate::cli::ReportKind;
use crate::core::MarketEngine;
use crate::io::csv_format::{write_accounts_csv, write_items_csv};
use crate::io::reader::OperationReader;
use crate::types::{MarketError, Operation};
use std::io::Write;
use std::path::Path;

/// Replay an operation log and write the requested report
///
/// # Arguments
///
/// * `input_path` - Path to the CSV operation log
/// * `report` - Which final-state report to write
/// * `output` - Destination for the report
///
/// # Returns
///
/// * `Ok(())` if the replay completed (possibly with skipped records)
/// * `Err(String)` if a fatal error occurred
pub fn replay(
    input_path: &Path,
    report: ReportKind,
    output: &mut dyn Write,
) -> Result<(), String> {
    let engine = MarketEngine::new();
    let reader = OperationReader::new(input_path)?;

    for result in reader {
        match result {
            Ok(op) => {
                if let Err(err) = apply(&engine, &op) {
                    if err.is_fatal() {
                        return Err(err.to_string());
                    }
                    eprintln!("Skipping operation: {}", err);
                }
            }
            Err(err) => eprintln!("Skipping record: {}", err),
        }
    }

    write_report(&engine, report, output)
}

/// Apply one parsed operation to the engine
fn apply(engine: &MarketEngine, op: &Operation) -> Result<(), MarketError> {
    match op {
        Operation::Register {
            username,
            email,
            budget,
        } => {
            engine.create_account(username, email, *budget)?;
        }
        Operation::ListItem {
            name,
            barcode,
            description,
            price,
        } => {
            engine.create_item(name, barcode, description, *price)?;
        }
        Operation::Purchase { account, item } => {
            engine.purchase(*account, *item)?;
        }
        Operation::Sell { account, item } => {
            engine.sell(*account, *item)?;
        }
    }
    Ok(())
}

/// Write the requested final-state report
fn write_report(
    engine: &MarketEngine,
    report: ReportKind,
    output: &mut dyn Write,
) -> Result<(), String> {
    match report {
        ReportKind::Accounts => write_accounts_csv(&engine.accounts(), output),
        ReportKind::Items => write_items_csv(&engine.items(), output),
        ReportKind::Both => {
            write_accounts_csv(&engine.accounts(), output)?;
            output
                .write_all(b"\n")
                .map_err(|e| format!("Failed to write output: {}", e))?;
            write_items_csv(&engine.items(), output)
        }
    }
}
