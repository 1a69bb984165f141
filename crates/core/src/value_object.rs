//! Quantity value objects.
//!
//! `Quantity` is what callers hand to the ledger; `StoredQuantity` is what the
//! ledger actually holds per item, which may be garbage when the backing file
//! was edited by something other than this program.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{LedgerError, LedgerResult};

/// Signed count of units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Quantity) -> LedgerResult<Quantity> {
        self.0
            .checked_add(rhs.0)
            .map(Quantity)
            .ok_or_else(|| LedgerError::invalid_input(format!("quantity overflow: {} + {}", self.0, rhs.0)))
    }

    pub fn checked_sub(self, rhs: Quantity) -> LedgerResult<Quantity> {
        self.0
            .checked_sub(rhs.0)
            .map(Quantity)
            .ok_or_else(|| LedgerError::invalid_input(format!("quantity overflow: {} - {}", self.0, rhs.0)))
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Quantity> for i64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl FromStr for Quantity {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Quantity)
            .map_err(|_| LedgerError::invalid_input(format!("quantity is not an integer: {s:?}")))
    }
}

/// Integer coercion for loose input.
///
/// Accepts integers, floats with no fractional part, and integer strings.
impl TryFrom<&JsonValue> for Quantity {
    type Error = LedgerError;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Quantity(i));
                }
                if n.is_u64() {
                    return Err(LedgerError::invalid_input(format!("quantity out of range: {n}")));
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Ok(Quantity(f as i64))
                    }
                    _ => Err(LedgerError::invalid_input(format!("quantity is not an integer: {n}"))),
                }
            }
            JsonValue::String(s) => s.parse(),
            other => Err(LedgerError::invalid_input(format!("quantity is not an integer: {other}"))),
        }
    }
}

/// Per-item value held by the ledger and written to the persisted file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredQuantity {
    Count(i64),
    /// Anything that is not a JSON integer; kept verbatim so a save does not lose it.
    Invalid(JsonValue),
}

impl StoredQuantity {
    pub fn as_count(&self) -> Option<i64> {
        match self {
            StoredQuantity::Count(n) => Some(*n),
            StoredQuantity::Invalid(_) => None,
        }
    }
}

impl From<Quantity> for StoredQuantity {
    fn from(value: Quantity) -> Self {
        StoredQuantity::Count(value.0)
    }
}

impl core::fmt::Display for StoredQuantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoredQuantity::Count(n) => core::fmt::Display::fmt(n, f),
            StoredQuantity::Invalid(v) => core::fmt::Display::fmt(v, f),
        }
    }
}
