//! Ledger error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the ledger and its persistence adapters.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant is a local, recoverable condition: the ledger stays usable
/// after any of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An item identifier or quantity was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The item is not present in the ledger.
    #[error("item not found: {0}")]
    NotFound(ItemId),

    /// Persisted data could not be decoded.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Reading or writing the persistence file failed.
    #[error("io failed: {0}")]
    Io(String),
}

impl LedgerError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(item: ItemId) -> Self {
        Self::NotFound(item)
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Short stable tag, used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::InvalidInput(_) => "invalid_input",
            LedgerError::NotFound(_) => "not_found",
            LedgerError::Decode(_) => "decode",
            LedgerError::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
