use std::sync::RwLock;

use stockledger_core::{LedgerError, LedgerResult};
use stockledger_inventory::{SnapshotStore, StockSnapshot};

/// In-memory store holding the encoded text.
///
/// Intended for tests/dev. Keeping text rather than a parsed snapshot lets
/// tests seed malformed data and inspect exactly what was written.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    raw: RwLock<Option<String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            raw: RwLock::new(Some(text.into())),
        }
    }

    /// Last text written (or seeded), if any.
    pub fn raw(&self) -> Option<String> {
        self.raw.read().ok().and_then(|raw| raw.clone())
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> LedgerResult<Option<StockSnapshot>> {
        let raw = self
            .raw
            .read()
            .map_err(|_| LedgerError::io("snapshot store lock poisoned"))?;
        raw.as_deref().map(StockSnapshot::decode).transpose()
    }

    fn save(&self, snapshot: &StockSnapshot) -> LedgerResult<()> {
        let text = snapshot.encode()?;
        let mut raw = self
            .raw
            .write()
            .map_err(|_| LedgerError::io("snapshot store lock poisoned"))?;
        *raw = Some(text);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
