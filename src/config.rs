use std::path::PathBuf;

use clap::Parser;

/// Personal income/expense ledger with a numbered menu
#[derive(Debug, Clone, Parser)]
#[command(name = "wallet_ledger")]
#[command(version)]
pub struct Config {
    /// Ledger CSV file
    #[arg(short, long, env = "WALLET_FILE", default_value = "collection.csv")]
    pub file: PathBuf,

    /// Diagnostic log file, appended to
    #[arg(long, env = "WALLET_LOG_FILE", default_value = "log.log")]
    pub log_file: PathBuf,

    /// Log filter directive, e.g. `info` or `wallet_ledger=debug`
    #[arg(long, env = "WALLET_LOG", default_value = "info")]
    pub log_level: String,
}
