use clap::Parser;
use std::path::PathBuf;

/// Runtime settings, read from the command line with environment fallbacks.
#[derive(Debug, Parser)]
#[command(name = "expenses", version, about = "Record and query personal expenses")]
pub struct Config {
    /// SQLite database file, created if it does not exist.
    #[arg(long, env = "EXPENSES_DB", default_value = "expenses.db")]
    pub database: PathBuf,

    /// Initialization script to run at startup instead of the built-in one.
    #[arg(long, env = "EXPENSES_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Default log filter (e.g. `info`, `debug`); `RUST_LOG` takes precedence.
    #[arg(long, env = "EXPENSES_LOG", default_value = "warn")]
    pub log_level: String,
}
