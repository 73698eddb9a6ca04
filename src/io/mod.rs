//! I/O handling module
//!
//! Contains the CSV format definitions for replay input and report output,
//! and the streaming reader over replay operations.

pub mod csv_format;
pub mod reader;

pub use csv_format::{convert_csv_record, write_accounts_csv, write_items_csv, CsvRecord};
pub use reader::OperationReader;
