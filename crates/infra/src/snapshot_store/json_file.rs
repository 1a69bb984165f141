use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use stockledger_core::{LedgerError, LedgerResult};
use stockledger_inventory::{SnapshotStore, StockSnapshot};

/// Data file used when the caller doesn't name one, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "inventory.json";

/// UTF-8 JSON file holding a single `{ item: quantity }` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the snapshot is written to before being renamed into place.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> LedgerResult<Option<StockSnapshot>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(LedgerError::io(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                )));
            }
        };

        StockSnapshot::decode_bytes(&bytes)
            .map(Some)
            .map_err(|err| match err {
                LedgerError::Decode(msg) => {
                    LedgerError::decode(format!("{}: {msg}", self.path.display()))
                }
                other => other,
            })
    }

    fn save(&self, snapshot: &StockSnapshot) -> LedgerResult<()> {
        let text = snapshot.encode()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| {
                LedgerError::io(format!("failed to create {}: {err}", parent.display()))
            })?;
        }

        // Write-then-rename so readers never see a half-written file.
        let staging = self.staging_path();
        if let Err(err) = std::fs::write(&staging, text) {
            let _ = std::fs::remove_file(&staging);
            return Err(LedgerError::io(format!(
                "failed to write {}: {err}",
                staging.display()
            )));
        }

        std::fs::rename(&staging, &self.path).map_err(|err| {
            let _ = std::fs::remove_file(&staging);
            LedgerError::io(format!(
                "failed to replace {}: {err}",
                self.path.display()
            ))
        })?;

        tracing::debug!(path = %self.path.display(), items = snapshot.len(), "wrote stock file");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
