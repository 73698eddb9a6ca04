use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay marketplace operations and report final state
#[derive(Parser, Debug)]
#[command(name = "market-engine")]
#[command(about = "Replay marketplace operations and report final state", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing the operation log
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Which final-state report to write to stdout
    #[arg(
        long = "report",
        value_name = "REPORT",
        default_value = "both",
        help = "Report to write: 'accounts', 'items', or 'both'"
    )]
    pub report: ReportKind,
}

/// Available final-state reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Accounts,
    Items,
    Both,
}
