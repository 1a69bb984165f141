//! Persistence seam for the ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockledger_core::{ItemId, LedgerResult, StoredQuantity};

/// The persisted form of a ledger: one JSON object mapping item id to quantity.
///
/// No version field, no checksum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockSnapshot(BTreeMap<ItemId, StoredQuantity>);

impl StockSnapshot {
    pub fn new(entries: BTreeMap<ItemId, StoredQuantity>) -> Self {
        Self(entries)
    }

    /// Parse persisted text. Anything that is not a JSON object keyed by
    /// non-empty strings is a decode error.
    pub fn decode(text: &str) -> LedgerResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Same as `decode`, for raw file contents. Bytes that are not UTF-8 are
    /// a decode error.
    pub fn decode_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn encode(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn entries(&self) -> &BTreeMap<ItemId, StoredQuantity> {
        &self.0
    }

    pub fn into_entries(self) -> BTreeMap<ItemId, StoredQuantity> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reads and writes whole snapshots, all at once.
pub trait SnapshotStore {
    /// `Ok(None)` means the source does not exist yet.
    fn load(&self) -> LedgerResult<Option<StockSnapshot>>;

    fn save(&self, snapshot: &StockSnapshot) -> LedgerResult<()>;

    /// Where the data lives, for log lines.
    fn describe(&self) -> String;
}
