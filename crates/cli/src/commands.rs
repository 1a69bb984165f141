use std::io::Write;

use anyhow::{Context, bail};
use serde_json::{Value as JsonValue, json};

use stockledger_core::{ItemId, LedgerError};
use stockledger_infra::JsonFileStore;
use stockledger_inventory::{LoadOutcome, RemoveOutcome, StockLedger};

use crate::config::{Cli, Command};

/// Execute one command against the configured data file.
///
/// Rejected operations (invalid input, unknown item) are reported as errors and
/// leave the file untouched. A file that exists but cannot be read or decoded is
/// never overwritten.
pub fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&cli.file);
    let mut ledger = StockLedger::new();

    let loaded = ledger
        .load_from(&store)
        .with_context(|| format!("failed to load {}", cli.file.display()))?;
    if loaded == LoadOutcome::Missing {
        tracing::debug!(path = %cli.file.display(), "starting a new data file");
    }

    match &cli.command {
        Command::Add { item, qty } => {
            let total = ledger
                .add_raw(&loose(item), &loose(qty))
                .context("add rejected")?;
            writeln!(out, "{item}: {total}")?;
            save(&ledger, &store)?;
        }
        Command::Remove { item, qty } => {
            match ledger.remove_raw(&loose(item), &loose(qty)) {
                Ok(RemoveOutcome::Remaining(left)) => writeln!(out, "{item}: {left}")?,
                Ok(RemoveOutcome::Depleted) => writeln!(out, "{item}: out of stock")?,
                Err(LedgerError::NotFound(missing)) => bail!("no stock recorded for {missing}"),
                Err(err) => return Err(err).context("remove rejected"),
            }
            save(&ledger, &store)?;
        }
        Command::Qty { item } => {
            let item: ItemId = item.parse()?;
            writeln!(out, "{}", ledger.quantity_of(&item))?;
        }
        Command::Low { threshold } => {
            for item in ledger.low_stock_items(*threshold) {
                writeln!(out, "{item}")?;
            }
        }
        Command::Report => write!(out, "{}", ledger.report())?,
        Command::Demo => demo(&store, out)?,
    }

    Ok(())
}

/// Command-line arguments are always text; the ledger decides what they mean.
fn loose(arg: &str) -> JsonValue {
    JsonValue::String(arg.to_string())
}

fn save(ledger: &StockLedger, store: &JsonFileStore) -> anyhow::Result<()> {
    ledger
        .save_to(store)
        .with_context(|| format!("failed to save {}", store.path().display()))
}

/// Scripted session on a fresh ledger. Whatever the configured file held is
/// overwritten.
fn demo(store: &JsonFileStore, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut ledger = StockLedger::new();

    let _ = ledger.add_raw(&json!("apple"), &json!(10));
    let _ = ledger.add_raw(&json!("banana"), &json!(-2));
    // Rejected: quantity is not an integer.
    let _ = ledger.add_raw(&json!(123), &json!("ten"));
    let _ = ledger.remove_raw(&json!("apple"), &json!(3));
    // Rejected: nothing recorded for orange.
    let _ = ledger.remove_raw(&json!("orange"), &json!(1));

    let apple = ItemId::new("apple")?;
    writeln!(out, "Apple stock: {}", ledger.quantity_of(&apple))?;

    let low: Vec<String> = ledger
        .low_stock_items(stockledger_inventory::DEFAULT_LOW_STOCK_THRESHOLD)
        .into_iter()
        .map(String::from)
        .collect();
    writeln!(out, "Low items: {}", low.join(", "))?;

    save(&ledger, store)?;
    ledger
        .load_from(store)
        .with_context(|| format!("failed to reload {}", store.path().display()))?;
    write!(out, "{}", ledger.report())?;

    for record in ledger.activity().iter() {
        tracing::debug!("{record}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use clap::Parser;

    fn run_args(file: &Path, args: &[&str]) -> (anyhow::Result<()>, String) {
        let mut argv = vec!["stockledger", "--file", file.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();

        let mut out = Vec::new();
        let result = run(&cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn add_then_remove_persists_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");

        let (result, out) = run_args(&file, &["add", "apple", "10"]);
        result.unwrap();
        assert_eq!(out, "apple: 10\n");

        let (result, out) = run_args(&file, &["remove", "apple", "3"]);
        result.unwrap();
        assert_eq!(out, "apple: 7\n");

        let (result, out) = run_args(&file, &["qty", "apple"]);
        result.unwrap();
        assert_eq!(out, "7\n");
        assert_eq!(read_json(&file), json!({"apple": 7}));
    }

    #[test]
    fn removing_everything_drops_the_item() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");
        run_args(&file, &["add", "apple", "10"]).0.unwrap();

        let (result, out) = run_args(&file, &["remove", "apple", "10"]);
        result.unwrap();
        assert_eq!(out, "apple: out of stock\n");
        assert_eq!(read_json(&file), json!({}));
    }

    #[test]
    fn rejected_operations_fail_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");

        assert!(run_args(&file, &["add", "apple", "ten"]).0.is_err());
        assert!(run_args(&file, &["remove", "orange", "1"]).0.is_err());
        assert!(!file.exists());
    }

    #[test]
    fn corrupt_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");
        std::fs::write(&file, "not json").unwrap();

        assert!(run_args(&file, &["add", "apple", "1"]).0.is_err());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "not json");
    }

    #[test]
    fn low_lists_items_below_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");
        std::fs::write(&file, r#"{"apple": 10, "banana": 5, "grape": 2}"#).unwrap();

        let (result, out) = run_args(&file, &["low"]);
        result.unwrap();
        assert_eq!(out, "grape\n");

        let (result, out) = run_args(&file, &["low", "--threshold", "6"]);
        result.unwrap();
        assert_eq!(out, "banana\ngrape\n");
    }

    #[test]
    fn report_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(&dir.path().join("missing.json"), &["report"]);
        result.unwrap();
        assert_eq!(out, "Items Report\n");
    }

    #[test]
    fn read_only_commands_leave_the_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");
        let original = r#"{"pear":  3}"#;
        std::fs::write(&file, original).unwrap();

        for args in [&["qty", "pear"][..], &["low"][..], &["report"][..]] {
            run_args(&file, args).0.unwrap();
        }
        assert_eq!(std::fs::read_to_string(&file).unwrap(), original);
    }

    #[test]
    fn demo_replaces_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");
        std::fs::write(&file, r#"{"pear": 3}"#).unwrap();

        run_args(&file, &["demo"]).0.unwrap();
        assert_eq!(read_json(&file), json!({"apple": 7, "banana": -2}));
    }

    #[test]
    fn demo_replays_the_scripted_session() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");

        let (result, out) = run_args(&file, &["demo"]);
        result.unwrap();
        assert_eq!(
            out,
            "Apple stock: 7\nLow items: banana\nItems Report\napple -> 7\nbanana -> -2\n"
        );
        assert_eq!(read_json(&file), json!({"apple": 7, "banana": -2}));
    }
}
