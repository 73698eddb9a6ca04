//! Market Engine CLI
//!
//! Command-line interface for replaying marketplace operation logs.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > report.csv
//! cargo run -- --report accounts operations.csv > accounts.csv
//! cargo run -- --report items operations.csv > items.csv
//! ```
//!
//! The program reads operation records from the input CSV file, replays them
//! through the market engine, and writes the final account and item states
//! to stdout. Rejected operations and malformed records are reported on
//! stderr and skipped.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (missing arguments, file not found, write failure, etc.)

use market_engine::cli;
use market_engine::replay;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Replay the operation log; the report goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = replay::replay(&args.input_file, args.report, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
