// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::display::{self, rating};
use crate::engine;
use crate::ledger::Ledger;
use crate::models::{Category, MonthKey};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(
    ledger: &Ledger,
    config: &Config,
    m: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance(ledger, config, sub)?,
        Some(("cashflow", sub)) => cashflow(ledger, config, sub)?,
        Some(("categories", sub)) => categories(ledger, config, sub)?,
        Some(("current", sub)) => current(ledger, config, sub, today)?,
        Some(("savings", sub)) => savings(ledger, sub)?,
        Some(("summary", sub)) => summary(ledger, config, sub)?,
        _ => {}
    }
    Ok(())
}

fn months(sub: &clap::ArgMatches) -> usize {
    *sub.get_one::<usize>("months").unwrap_or(&12)
}

fn output_flags(sub: &clap::ArgMatches) -> (bool, bool) {
    (sub.get_flag("json"), sub.get_flag("jsonl"))
}

fn balance(ledger: &Ledger, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let points = engine::running_balance(ledger);
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(points.len());
    let shown = &points[points.len().saturating_sub(limit)..];
    if !maybe_print_json(json_flag, jsonl_flag, &shown)? {
        println!(
            "{}",
            display::balance_table(shown, &config.currency_symbol, limit)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CashflowRow {
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
}

pub fn cashflow_rows(ledger: &Ledger, months: usize) -> Vec<CashflowRow> {
    let monthly = engine::monthly_income_expense(ledger);
    let skip = monthly.len().saturating_sub(months);
    monthly
        .into_iter()
        .skip(skip)
        .map(|(month, flows)| CashflowRow {
            month,
            income: flows.income,
            expense: flows.expense,
        })
        .collect()
}

fn cashflow(ledger: &Ledger, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = cashflow_rows(ledger, months(sub));
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let monthly = engine::monthly_income_expense(ledger);
        println!(
            "{}",
            display::income_vs_expense_table(&monthly, &config.currency_symbol, months(sub))
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub month: MonthKey,
    pub category: Category,
    pub amount: Decimal,
}

fn categories(ledger: &Ledger, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let breakdown = engine::monthly_category_breakdown(ledger);
    let skip = breakdown.len().saturating_sub(months(sub));
    let data: Vec<CategoryRow> = breakdown
        .iter()
        .skip(skip)
        .flat_map(|(month, totals)| {
            totals.iter().map(move |(category, amount)| CategoryRow {
                month: *month,
                category: category.clone(),
                amount: *amount,
            })
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            display::category_table(&breakdown, &config.currency_symbol, months(sub))
        );
    }
    Ok(())
}

/// First day of `--month`, or `today` when the flag is absent.
pub fn reference_date(sub: &clap::ArgMatches, today: NaiveDate) -> Result<NaiveDate> {
    match sub.get_one::<String>("month") {
        Some(raw) => Ok(raw
            .parse::<MonthKey>()
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", raw))?
            .first_day()),
        None => Ok(today),
    }
}

#[derive(Debug, Serialize)]
pub struct CurrentRow {
    pub category: Category,
    pub amount: Decimal,
}

fn current(
    ledger: &Ledger,
    config: &Config,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let reference = reference_date(sub, today)?;
    let totals = engine::current_month_breakdown(ledger, reference);
    let data: Vec<CurrentRow> = totals
        .iter()
        .map(|(category, amount)| CurrentRow {
            category: category.clone(),
            amount: *amount,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", MonthKey::of(reference));
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.category.to_string(),
                    fmt_money(&r.amount, &config.currency_symbol),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Net"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SavingsRow {
    pub month: MonthKey,
    pub rate: Decimal,
    pub rating: &'static str,
}

fn savings(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let rates = engine::savings_rate(ledger);
    let skip = rates.len().saturating_sub(months(sub));
    let data: Vec<SavingsRow> = rates
        .iter()
        .skip(skip)
        .map(|r| SavingsRow {
            month: r.month,
            rate: r.rate,
            rating: rating(&r.rate),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", display::savings_table(&rates, months(sub)));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
    pub savings_rate: Decimal,
}

pub fn summary_rows(ledger: &Ledger, months: usize) -> Vec<SummaryRow> {
    let monthly = engine::monthly_income_expense(ledger);
    let skip = monthly.len().saturating_sub(months);
    monthly
        .into_iter()
        .skip(skip)
        .map(|(month, flows)| SummaryRow {
            month,
            income: flows.income,
            expense: flows.expense,
            savings: flows.net(),
            savings_rate: flows.savings_rate(),
        })
        .collect()
}

fn summary(ledger: &Ledger, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = output_flags(sub);
    let data = summary_rows(ledger, months(sub));
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No data available for monthly summary.");
            return Ok(());
        }
        let monthly = engine::monthly_income_expense(ledger);
        println!(
            "{}",
            display::summary_table(&monthly, &config.currency_symbol, months(sub))
        );
    }
    Ok(())
}
