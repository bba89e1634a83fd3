// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerdash::config::DEFAULT_CATEGORIES;
use ledgerdash::errors::StoreError;
use ledgerdash::ledger::Ledger;
use ledgerdash::models::{Category, Transaction};
use ledgerdash::store::{open_or_init, sample_ledger, CsvStore, LedgerStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use tempfile::tempdir;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(date: &str, amount: Decimal, category: &str, description: &str) -> Transaction {
    Transaction::new(d(date), amount, Category::parse(category).unwrap(), description)
}

fn categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[test]
fn save_then_load_round_trips_with_header() {
    let dir = tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("ledger.csv"));
    let ledger = Ledger::new()
        .append(tx("2024-01-05", dec!(1000), "Salary", "January, net"))
        .append(tx("2024-01-10", dec!(-200.75), "Groceries", "\"big\" shop"))
        .append(tx("2024-01-10", dec!(-200.75), "Groceries", "\"big\" shop"));

    store.save(&ledger).unwrap();
    let contents = fs::read_to_string(store.path()).unwrap();
    assert!(contents.starts_with("date,amount,category,description\n"));
    assert!(contents.contains("2024-01-10,-200.75,Groceries"));

    assert_eq!(store.load().unwrap(), ledger);
    assert!(!dir.path().join("ledger.csv.tmp").exists());
}

#[test]
fn append_writes_header_once() {
    let dir = tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("nested").join("ledger.csv"));
    store.append(&tx("2024-02-01", dec!(-50), "Entertainment", "")).unwrap();
    store.append(&tx("2024-02-02", dec!(20), "Income", "refund")).unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    assert_eq!(contents.matches("date,amount").count(), 1);

    let ledger = store.load().unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.all()[1].description(), "refund");
}

#[test]
fn append_after_save_preserves_order() {
    let dir = tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("ledger.csv"));
    store
        .save(&Ledger::new().append(tx("2024-03-09", dec!(-1), "Food", "a")))
        .unwrap();
    store.append(&tx("2024-03-01", dec!(-2), "Food", "b")).unwrap();
    let descriptions: Vec<String> = store
        .load()
        .unwrap()
        .all()
        .iter()
        .map(|t| t.description().to_string())
        .collect();
    assert_eq!(descriptions, vec!["a", "b"]);
}

#[test]
fn missing_file_is_unavailable() {
    let dir = tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("absent.csv"));
    assert!(!store.exists());
    assert!(matches!(store.load(), Err(StoreError::Unavailable { .. })));
}

#[test]
fn empty_file_loads_as_empty_ledger() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    fs::write(&path, "").unwrap();
    assert!(CsvStore::new(&path).load().unwrap().is_empty());

    fs::write(&path, "date,amount,category,description\n").unwrap();
    assert!(CsvStore::new(&path).load().unwrap().is_empty());
}

#[test]
fn bad_rows_are_corrupt_with_row_number() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    fs::write(
        &path,
        "date,amount,category,description\n2024-01-01,5,Food,ok\n2024-01-02,abc,Food,bad\n",
    )
    .unwrap();
    match CsvStore::new(&path).load() {
        Err(StoreError::Corrupt { row, reason, .. }) => {
            assert_eq!(row, 3);
            assert!(reason.contains("abc"));
        }
        other => panic!("expected corrupt store, got {:?}", other),
    }

    fs::write(&path, "date,amount,category,description\n,5,Food,\n").unwrap();
    assert!(matches!(
        CsvStore::new(&path).load(),
        Err(StoreError::Corrupt { row: 2, .. })
    ));

    fs::write(&path, "date,amount,category,description\n2024-01-01,5, ,x\n").unwrap();
    assert!(matches!(
        CsvStore::new(&path).load(),
        Err(StoreError::Corrupt { row: 2, .. })
    ));

    fs::write(&path, "date,amount,category,description\n2024-01-01,5\n").unwrap();
    assert!(matches!(
        CsvStore::new(&path).load(),
        Err(StoreError::Corrupt { .. })
    ));
}

#[test]
fn unexpected_header_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    fs::write(&path, "when,how_much,kind,note\n2024-01-01,5,Food,x\n").unwrap();
    assert!(matches!(
        CsvStore::new(&path).load(),
        Err(StoreError::Corrupt { row: 1, .. })
    ));
}

#[test]
fn capitalised_header_and_timestamps_are_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("finance_data.csv");
    fs::write(
        &path,
        "Date,Amount,Category,Description\n\
         2024-04-01 09:15:00.123456,-42,Food,Sample Transaction 1\n\
         2024-04-02,300,Income,\n",
    )
    .unwrap();
    let ledger = CsvStore::new(&path).load().unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.all()[0].date(), d("2024-04-01"));
    assert_eq!(ledger.total(), dec!(258));
}

#[test]
fn append_terminates_a_last_row_without_newline() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    fs::write(&path, "date,amount,category,description\n2024-01-01,5,Food,x").unwrap();
    let store = CsvStore::new(&path);
    assert_eq!(store.load().unwrap().len(), 1);

    store.append(&tx("2024-01-02", dec!(-3), "Food", "y")).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.ends_with("2024-01-01,5,Food,x\n2024-01-02,-3,Food,y\n"));

    let ledger = store.load().unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.all()[1].description(), "y");
    assert_eq!(ledger.total(), dec!(2));
}

#[test]
fn open_or_init_seeds_sample_once() {
    let dir = tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("ledger.csv"));
    let anchor = d("2024-05-20");

    let seeded = open_or_init(&store, anchor, &categories()).unwrap();
    assert_eq!(seeded.len(), 30);
    assert!(store.exists());

    store.append(&tx("2024-05-20", dec!(-5), "Food", "extra")).unwrap();
    let reopened = open_or_init(&store, d("2030-01-01"), &categories()).unwrap();
    assert_eq!(reopened.len(), 31);
    assert_eq!(reopened.all()[..30], seeded.all()[..]);
}

#[test]
fn open_or_init_propagates_corruption() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    fs::write(&path, "date,amount,category,description\nnot-a-date,1,Food,\n").unwrap();
    let store = CsvStore::new(&path);
    assert!(open_or_init(&store, d("2024-01-01"), &categories()).is_err());
    // the user's file is left alone
    assert!(fs::read_to_string(&path).unwrap().contains("not-a-date"));
}

#[test]
fn sample_ledger_is_deterministic_and_signed_by_category() {
    let anchor = d("2024-05-20");
    let a = sample_ledger(anchor, &categories());
    let b = sample_ledger(anchor, &categories());
    assert_eq!(a, b);
    assert_eq!(a.len(), 30);
    assert_eq!(a.all()[0].date(), d("2024-04-20"));
    assert_eq!(a.all()[29].date(), d("2024-05-19"));
    assert_eq!(a.all()[0].description(), "Sample Transaction 1");
    for t in a.all() {
        if t.category().as_str() == "Income" {
            assert!(t.is_income());
        } else {
            assert!(t.is_expense());
        }
    }
    assert!(a.all().iter().any(|t| t.category().as_str() == "Income"));
}
