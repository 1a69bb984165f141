//! Command-line wrapper around the stock ledger.
//!
//! Every command loads the data file first. `add` and `remove` write it back
//! after a successful change; `qty`, `low` and `report` never write. `demo`
//! replaces the file's contents with its own scripted ledger.

pub mod commands;
pub mod config;

pub use commands::run;
pub use config::{Cli, Command};
