//! `SnapshotStore` implementations.
//!
//! Both adapters move the whole dataset at once; there is no locking between
//! writers of the same file.

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemorySnapshotStore;
pub use json_file::{DEFAULT_DATA_FILE, JsonFileStore};
