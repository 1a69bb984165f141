//! Console stock report.

use stockledger_core::{ItemId, StoredQuantity};

/// Plain-text listing of every item, in identifier order.
#[derive(Debug, Clone, PartialEq)]
pub struct StockReport {
    rows: Vec<(ItemId, StoredQuantity)>,
}

impl StockReport {
    pub fn new(rows: Vec<(ItemId, StoredQuantity)>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[(ItemId, StoredQuantity)] {
        &self.rows
    }
}

impl core::fmt::Display for StockReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Items Report")?;
        for (item, qty) in &self.rows {
            writeln!(f, "{item} -> {qty}")?;
        }
        Ok(())
    }
}
