//! Inventory stock ledger.
//!
//! This crate contains the in-memory ledger and the persistence seam it talks
//! to. It performs no IO itself; adapters live in `stockledger-infra`.

pub mod activity;
pub mod ledger;
pub mod report;
pub mod store;

pub use activity::{ActivityAction, ActivityLog, ActivityRecord};
pub use ledger::{DEFAULT_LOW_STOCK_THRESHOLD, LoadOutcome, RemoveOutcome, StockLedger};
pub use report::StockReport;
pub use store::{SnapshotStore, StockSnapshot};
