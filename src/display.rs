// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Text rendering of the derived views.

use crate::config::Config;
use crate::engine::{self, BalancePoint, CategoryTotals, IncomeExpense, MonthlyRate};
use crate::ledger::Ledger;
use crate::models::{MonthKey, Transaction, DATE_FORMAT};
use crate::utils::{bar, fmt_money, fmt_percent, pretty_table};
use chrono::NaiveDate;
use comfy_table::Table;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

const BAR_WIDTH: usize = 24;
const BALANCE_POINTS: usize = 15;
const NO_DATA: &str = "No data available";

pub fn good_rate() -> Decimal {
    Decimal::new(10, 2)
}

pub fn excellent_rate() -> Decimal {
    Decimal::new(20, 2)
}

/// Label for a savings rate against the 10% / 20% thresholds.
pub fn rating(rate: &Decimal) -> &'static str {
    if *rate >= excellent_rate() {
        "Excellent"
    } else if *rate >= good_rate() {
        "Good"
    } else if *rate >= Decimal::ZERO {
        "Low"
    } else {
        "Negative"
    }
}

fn last_months<V>(map: &BTreeMap<MonthKey, V>, months: usize) -> Vec<(&MonthKey, &V)> {
    let skip = map.len().saturating_sub(months);
    map.iter().skip(skip).collect()
}

pub fn recent_table(txs: &[&Transaction], symbol: &str) -> Table {
    let rows = txs
        .iter()
        .map(|tx| {
            vec![
                tx.date().format(DATE_FORMAT).to_string(),
                fmt_money(&tx.amount(), symbol),
                tx.category().to_string(),
                tx.description().to_string(),
            ]
        })
        .collect();
    pretty_table(&["Date", "Amount", "Category", "Description"], rows)
}

pub fn balance_table(points: &[BalancePoint], symbol: &str, limit: usize) -> Table {
    let shown = &points[points.len().saturating_sub(limit)..];
    let max = shown
        .iter()
        .map(|p| p.balance.abs())
        .max()
        .unwrap_or(Decimal::ZERO);
    let rows = shown
        .iter()
        .map(|p| {
            let chart = bar(&p.balance, &max, BAR_WIDTH);
            vec![
                p.date.format(DATE_FORMAT).to_string(),
                fmt_money(&p.balance, symbol),
                if p.balance.is_sign_negative() {
                    format!("-{}", chart)
                } else {
                    chart
                },
            ]
        })
        .collect();
    pretty_table(&["Date", "Balance", ""], rows)
}

pub fn summary_table(
    monthly: &BTreeMap<MonthKey, IncomeExpense>,
    symbol: &str,
    months: usize,
) -> Table {
    let rows = last_months(monthly, months)
        .into_iter()
        .map(|(month, flows)| {
            vec![
                month.to_string(),
                fmt_money(&flows.income, symbol),
                fmt_money(&flows.expense, symbol),
                fmt_money(&flows.net(), symbol),
                fmt_percent(&flows.savings_rate()),
            ]
        })
        .collect();
    pretty_table(
        &["Month", "Income", "Expenses", "Savings", "Savings Rate"],
        rows,
    )
}

pub fn income_vs_expense_table(
    monthly: &BTreeMap<MonthKey, IncomeExpense>,
    symbol: &str,
    months: usize,
) -> Table {
    let shown = last_months(monthly, months);
    let max = shown
        .iter()
        .map(|(_, f)| f.income.max(f.expense))
        .max()
        .unwrap_or(Decimal::ZERO);
    let rows = shown
        .into_iter()
        .map(|(month, flows)| {
            vec![
                month.to_string(),
                fmt_money(&flows.income, symbol),
                bar(&flows.income, &max, BAR_WIDTH),
                fmt_money(&flows.expense, symbol),
                bar(&flows.expense, &max, BAR_WIDTH),
            ]
        })
        .collect();
    pretty_table(&["Month", "Income", "", "Expenses", ""], rows)
}

pub fn category_table(
    breakdown: &BTreeMap<MonthKey, CategoryTotals>,
    symbol: &str,
    months: usize,
) -> Table {
    let mut rows = Vec::new();
    for (month, totals) in last_months(breakdown, months) {
        for (category, amount) in totals {
            rows.push(vec![
                month.to_string(),
                category.to_string(),
                fmt_money(amount, symbol),
            ]);
        }
    }
    pretty_table(&["Month", "Category", "Amount"], rows)
}

/// Spending per category with its share of the month's total spending.
pub fn spending_share_table(spending: &CategoryTotals, symbol: &str) -> Table {
    let total = engine::saturating_sum(spending.values().copied());
    let mut items: Vec<_> = spending.iter().collect();
    items.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    let rows = items
        .into_iter()
        .map(|(category, amount)| {
            let share = amount.checked_div(total).unwrap_or(Decimal::ZERO);
            vec![
                category.to_string(),
                fmt_money(amount, symbol),
                fmt_percent(&share),
                bar(amount, &total, BAR_WIDTH),
            ]
        })
        .collect();
    pretty_table(&["Category", "Spent", "Share", ""], rows)
}

pub fn savings_table(rates: &[MonthlyRate], months: usize) -> Table {
    let shown = &rates[rates.len().saturating_sub(months)..];
    let rows = shown
        .iter()
        .map(|r| {
            vec![
                r.month.to_string(),
                fmt_percent(&r.rate),
                rating(&r.rate).to_string(),
            ]
        })
        .collect();
    pretty_table(&["Month", "Savings Rate", "Rating"], rows)
}

fn section(out: &mut String, title: &str, body: Option<Table>) {
    out.push_str(title);
    out.push('\n');
    match body {
        Some(table) => out.push_str(&table.to_string()),
        None => out.push_str(NO_DATA),
    }
    out.push_str("\n\n");
}

/// All views stacked into one text report.
pub fn dashboard(ledger: &Ledger, today: NaiveDate, config: &Config) -> String {
    let symbol = config.currency_symbol.as_str();
    let months = config.dashboard_months;
    let mut out = String::from("===== Personal Finance Dashboard =====\n\n");

    let points = engine::running_balance(ledger);
    section(
        &mut out,
        "Balance Over Time",
        (!points.is_empty()).then(|| balance_table(&points, symbol, BALANCE_POINTS)),
    );

    let spending = engine::monthly_spending_by_category(ledger);
    section(
        &mut out,
        "Monthly Spending by Category",
        (!spending.is_empty()).then(|| category_table(&spending, symbol, months)),
    );

    let monthly = engine::monthly_income_expense(ledger);
    section(
        &mut out,
        "Income vs Expenses",
        (!monthly.is_empty()).then(|| income_vs_expense_table(&monthly, symbol, months)),
    );

    let current = engine::spending_only(&engine::current_month_breakdown(ledger, today));
    if current.is_empty() {
        out.push_str("Current Month Spending\nNo expenses this month\n\n");
    } else {
        let total = engine::saturating_sum(current.values().copied());
        let title = format!(
            "Current Month Spending by Category (Total: {})",
            fmt_money(&total, symbol)
        );
        section(&mut out, &title, Some(spending_share_table(&current, symbol)));
    }

    let rates = engine::savings_rate(ledger);
    section(
        &mut out,
        "Monthly Savings Rate (10% - Good, 20% - Excellent)",
        (!rates.is_empty()).then(|| savings_table(&rates, months)),
    );
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}
