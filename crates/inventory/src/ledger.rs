use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use stockledger_core::{ItemId, LedgerError, LedgerResult, Quantity, StoredQuantity};

use crate::activity::{ActivityAction, ActivityLog};
use crate::report::StockReport;
use crate::store::{SnapshotStore, StockSnapshot};

/// Threshold used by callers that don't pick one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Result of a successful `remove`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Remaining(Quantity),
    /// Quantity reached zero or below; the entry no longer exists.
    Depleted,
}

/// Result of a successful `load_from`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { items: usize },
    /// Nothing persisted yet; the ledger is empty.
    Missing,
}

/// In-memory quantity ledger.
///
/// Absence of an entry means "no stock": `remove` deletes entries that drop to
/// zero or below instead of storing them. `add` never deletes, so a negative
/// addition can leave a non-positive entry behind.
#[derive(Debug, Clone)]
pub struct StockLedger {
    stock: BTreeMap<ItemId, StoredQuantity>,
    activity: ActivityLog,
    clock: fn() -> DateTime<Utc>,
}

impl Default for StockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl StockLedger {
    pub fn new() -> Self {
        Self {
            stock: BTreeMap::new(),
            activity: ActivityLog::new(),
            clock: Utc::now,
        }
    }

    pub fn from_snapshot(snapshot: StockSnapshot) -> Self {
        Self {
            stock: snapshot.into_entries(),
            ..Self::new()
        }
    }

    /// Replace the timestamp source for activity records.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    pub fn contains(&self, item: &ItemId) -> bool {
        self.stock.contains_key(item)
    }

    pub fn items(&self) -> impl Iterator<Item = (&ItemId, &StoredQuantity)> {
        self.stock.iter()
    }

    pub fn snapshot(&self) -> StockSnapshot {
        StockSnapshot::new(self.stock.clone())
    }

    pub fn report(&self) -> StockReport {
        StockReport::new(
            self.stock
                .iter()
                .map(|(item, qty)| (item.clone(), qty.clone()))
                .collect(),
        )
    }

    /// Increase `item` by `qty`, creating it at zero if absent.
    ///
    /// Returns the new quantity.
    pub fn add(&mut self, item: &ItemId, qty: Quantity) -> LedgerResult<Quantity> {
        let current = self.current(item)?.unwrap_or(Quantity::ZERO);
        let updated = current.checked_add(qty).inspect_err(|err| {
            tracing::error!(item = %item, qty = qty.get(), "rejected add: {err}");
        })?;

        self.stock.insert(item.clone(), updated.into());
        self.record(ActivityAction::Added {
            item: item.clone(),
            qty,
        });
        tracing::info!(item = %item, qty = qty.get(), total = updated.get(), "added stock");
        Ok(updated)
    }

    /// `add` for loosely typed input (strings or integers for the item,
    /// anything integer-coercible for the quantity).
    pub fn add_raw(&mut self, item: &JsonValue, qty: &JsonValue) -> LedgerResult<Quantity> {
        let item = ItemId::try_from(item).inspect_err(|err| {
            tracing::warn!("ignoring add for invalid item {item}: {err}");
        })?;
        let qty = Quantity::try_from(qty).inspect_err(|err| {
            tracing::error!(item = %item, "ignoring add with invalid quantity: {err}");
        })?;
        self.add(&item, qty)
    }

    /// Decrease `item` by a strictly positive `qty`.
    ///
    /// Fails with `NotFound` when the item is absent; the ledger is unchanged.
    pub fn remove(&mut self, item: &ItemId, qty: Quantity) -> LedgerResult<RemoveOutcome> {
        if !qty.is_positive() {
            tracing::error!(item = %item, qty = qty.get(), "ignoring remove: quantity must be positive");
            return Err(LedgerError::invalid_input(format!(
                "quantity must be positive, got {qty}"
            )));
        }

        let Some(current) = self.current(item)? else {
            tracing::warn!(item = %item, "failed to remove item: not in stock");
            return Err(LedgerError::not_found(item.clone()));
        };

        let remaining = current.checked_sub(qty).inspect_err(|err| {
            tracing::error!(item = %item, qty = qty.get(), "rejected remove: {err}");
        })?;

        if remaining.is_positive() {
            self.stock.insert(item.clone(), remaining.into());
            self.record(ActivityAction::Removed {
                item: item.clone(),
                qty,
                remaining,
            });
            tracing::info!(item = %item, qty = qty.get(), total = remaining.get(), "removed stock");
            Ok(RemoveOutcome::Remaining(remaining))
        } else {
            self.stock.remove(item);
            self.record(ActivityAction::Depleted {
                item: item.clone(),
                qty,
            });
            tracing::info!(item = %item, qty = qty.get(), "removed stock; item depleted");
            Ok(RemoveOutcome::Depleted)
        }
    }

    /// `remove` for loosely typed input.
    pub fn remove_raw(&mut self, item: &JsonValue, qty: &JsonValue) -> LedgerResult<RemoveOutcome> {
        let item = ItemId::try_from(item).inspect_err(|err| {
            tracing::warn!("ignoring remove for invalid item {item}: {err}");
        })?;
        let qty = Quantity::try_from(qty).inspect_err(|err| {
            tracing::error!(item = %item, "ignoring remove with invalid quantity: {err}");
        })?;
        self.remove(&item, qty)
    }

    /// Stored quantity, or 0 when absent. Corrupt stored values also read as 0.
    pub fn quantity_of(&self, item: &ItemId) -> i64 {
        match self.stock.get(item) {
            Some(StoredQuantity::Count(n)) => *n,
            Some(StoredQuantity::Invalid(value)) => {
                tracing::warn!(item = %item, "stored quantity is not an integer: {value}");
                0
            }
            None => 0,
        }
    }

    /// Items whose quantity is strictly below `threshold`.
    ///
    /// Entries holding a non-integer value are skipped with a warning.
    pub fn low_stock_items(&self, threshold: i64) -> BTreeSet<ItemId> {
        self.stock
            .iter()
            .filter_map(|(item, stored)| match stored {
                StoredQuantity::Count(n) => (*n < threshold).then(|| item.clone()),
                StoredQuantity::Invalid(value) => {
                    tracing::warn!(item = %item, "skipping low-stock check, quantity is not an integer: {value}");
                    None
                }
            })
            .collect()
    }

    /// Replace the whole ledger with what `store` holds.
    ///
    /// On any failure the ledger is left empty and the error is returned.
    pub fn load_from<S>(&mut self, store: &S) -> LedgerResult<LoadOutcome>
    where
        S: SnapshotStore + ?Sized,
    {
        self.stock.clear();

        match store.load() {
            Ok(Some(snapshot)) => {
                let items = snapshot.len();
                self.stock = snapshot.into_entries();
                self.record(ActivityAction::Loaded { items });
                tracing::info!(source = %store.describe(), items, "loaded stock");
                Ok(LoadOutcome::Loaded { items })
            }
            Ok(None) => {
                tracing::warn!(source = %store.describe(), "no stock file found; starting empty");
                Ok(LoadOutcome::Missing)
            }
            Err(err) => {
                tracing::error!(source = %store.describe(), kind = err.kind(), "failed to load stock: {err}");
                Err(err)
            }
        }
    }

    /// Write the current contents to `store`. The ledger is never modified.
    pub fn save_to<S>(&self, store: &S) -> LedgerResult<()>
    where
        S: SnapshotStore + ?Sized,
    {
        store.save(&self.snapshot()).inspect_err(|err| {
            tracing::error!(sink = %store.describe(), kind = err.kind(), "failed to save stock: {err}");
        })?;
        tracing::info!(sink = %store.describe(), items = self.stock.len(), "saved stock");
        Ok(())
    }

    fn current(&self, item: &ItemId) -> LedgerResult<Option<Quantity>> {
        match self.stock.get(item) {
            None => Ok(None),
            Some(StoredQuantity::Count(n)) => Ok(Some(Quantity::new(*n))),
            Some(StoredQuantity::Invalid(value)) => {
                tracing::error!(item = %item, "stored quantity is not an integer: {value}");
                Err(LedgerError::decode(format!(
                    "stored quantity for {item} is not an integer: {value}"
                )))
            }
        }
    }

    fn record(&mut self, action: ActivityAction) {
        let at = (self.clock)();
        self.activity.record(at, action);
    }
}
