//! Item identifiers.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::LedgerError;

/// Identifier of a tracked stock-keeping unit.
///
/// Always non-empty. Integer-like identifiers are stored in their decimal form,
/// which is also how they appear as keys in the persisted file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Result<Self, LedgerError> {
        let value = value.into();
        if value.is_empty() {
            return Err(LedgerError::invalid_input("item identifier cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for ItemId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Loose input: strings and integers name an item, nothing else does.
impl TryFrom<&JsonValue> for ItemId {
    type Error = LedgerError;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::String(s) => Self::new(s.as_str()),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::from(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self::from(u))
                } else {
                    Err(LedgerError::invalid_input(format!(
                        "item identifier must be a string or integer, got {n}"
                    )))
                }
            }
            other => Err(LedgerError::invalid_input(format!(
                "item identifier must be a string or integer, got {other}"
            ))),
        }
    }
}
