//! `stockledger-core` — value types shared by the ledger and its adapters.
//!
//! This crate contains **pure** primitives (no IO, no logging).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{LedgerError, LedgerResult};
pub use id::ItemId;
pub use value_object::{Quantity, StoredQuantity};
