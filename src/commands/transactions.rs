// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::ledger::Ledger;
use crate::models::{MonthKey, Transaction, DATE_FORMAT};
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: LedgerStore>(
    store: &S,
    ledger: &Ledger,
    config: &Config,
    m: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(store, sub, today)?;
        }
        Some(("list", sub)) => list(ledger, config, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn add<S: LedgerStore>(
    store: &S,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Transaction> {
    let arg = |name: &str| {
        sub.get_one::<String>(name)
            .map(String::as_str)
            .unwrap_or("")
    };
    let tx = Transaction::normalize(
        arg("date"),
        arg("amount"),
        arg("category"),
        arg("description"),
        today,
    )?;
    store
        .append(&tx)
        .context("Failed to record transaction")?;
    println!(
        "Recorded {} on {} in '{}'",
        tx.amount(),
        tx.date(),
        tx.category()
    );
    Ok(tx)
}

fn list(ledger: &Ledger, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    fmt_money(&r.amount, &config.currency_symbol),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Amount", "Category", "Description"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: tx.date().format(DATE_FORMAT).to_string(),
            amount: tx.amount(),
            category: tx.category().to_string(),
            description: tx.description().to_string(),
        }
    }
}

/// Newest first, filtered by `--month`, `--category` and `--search`, capped by `--limit`.
pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|m| m.parse::<MonthKey>())
        .transpose()
        .context("Invalid --month, expected YYYY-MM")?;
    let category = sub.get_one::<String>("category").map(|c| c.trim());
    let search = sub
        .get_one::<String>("search")
        .map(|p| Regex::new(p).with_context(|| format!("Invalid search pattern '{}'", p)))
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let data = ledger
        .recent(usize::MAX)
        .into_iter()
        .filter(|tx| month.is_none_or(|m| m.contains(tx.date())))
        .filter(|tx| category.is_none_or(|c| tx.category().as_str().eq_ignore_ascii_case(c)))
        .filter(|tx| {
            search.as_ref().is_none_or(|re| {
                re.is_match(tx.category().as_str()) || re.is_match(tx.description())
            })
        })
        .take(limit)
        .map(TransactionRow::from)
        .collect();
    Ok(data)
}
