//! Human-readable activity trail kept alongside the ledger.

use chrono::{DateTime, Utc};

use stockledger_core::{ItemId, Quantity};

/// What happened to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityAction {
    Added { item: ItemId, qty: Quantity },
    Removed { item: ItemId, qty: Quantity, remaining: Quantity },
    /// A removal took the item to zero or below and the entry was dropped.
    Depleted { item: ItemId, qty: Quantity },
    Loaded { items: usize },
}

impl core::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ActivityAction::Added { item, qty } => write!(f, "Added {qty} of {item}"),
            ActivityAction::Removed { item, qty, remaining } => {
                write!(f, "Removed {qty} of {item} ({remaining} left)")
            }
            ActivityAction::Depleted { item, qty } => {
                write!(f, "Removed {qty} of {item} (depleted)")
            }
            ActivityAction::Loaded { items } => write!(f, "Loaded {items} items"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub at: DateTime<Utc>,
    pub action: ActivityAction,
}

impl core::fmt::Display for ActivityRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.at, self.action)
    }
}

/// Append-only, process-lifetime log. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<ActivityRecord>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, at: DateTime<Utc>, action: ActivityAction) {
        self.entries.push(ActivityRecord { at, action });
    }

    pub fn entries(&self) -> &[ActivityRecord] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ActivityRecord> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.entries.iter()
    }
}
