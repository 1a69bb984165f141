//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use stockledger_infra::DEFAULT_DATA_FILE;
use stockledger_inventory::DEFAULT_LOW_STOCK_THRESHOLD;
use stockledger_observability::{LogConfig, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "stockledger")]
#[command(about = "Track stock quantities in a JSON file")]
pub struct Cli {
    /// Data file holding the ledger
    #[arg(long, global = true, env = "STOCKLEDGER_FILE", default_value = DEFAULT_DATA_FILE)]
    pub file: PathBuf,

    /// Log output format (text or json)
    #[arg(long, global = true, env = "STOCKLEDGER_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add units of an item (negative quantities are allowed)
    Add {
        item: String,
        #[arg(allow_hyphen_values = true)]
        qty: String,
    },
    /// Remove units of an item; the item disappears at zero
    Remove {
        item: String,
        #[arg(allow_hyphen_values = true)]
        qty: String,
    },
    /// Print the quantity held for an item
    Qty { item: String },
    /// List items below a threshold
    Low {
        #[arg(long, env = "STOCKLEDGER_LOW_STOCK_THRESHOLD", default_value_t = DEFAULT_LOW_STOCK_THRESHOLD, allow_hyphen_values = true)]
        threshold: i64,
    },
    /// Print every item and its quantity
    Report,
    /// Run a short scripted session, replacing the data file's contents
    Demo,
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            format: self.log_format,
            ..LogConfig::default()
        }
    }
}
