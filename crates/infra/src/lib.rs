//! Infrastructure layer: persistence adapters for the stock ledger.

pub mod snapshot_store;

pub use snapshot_store::{DEFAULT_DATA_FILE, InMemorySnapshotStore, JsonFileStore};
