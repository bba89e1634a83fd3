// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a ledger snapshot.
//!
//! Every function here is pure: it reads the ledger, never mutates it, and
//! returns a freshly built value. An empty ledger yields empty outputs.
//!
//! Sums saturate at `Decimal::MIN`/`Decimal::MAX` instead of overflowing.

use crate::ledger::Ledger;
use crate::models::{Category, MonthKey, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Cumulative balance right after one transaction, in date order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// Income and expense of a month, both as non-negative magnitudes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IncomeExpense {
    pub income: Decimal,
    pub expense: Decimal,
}

impl IncomeExpense {
    pub fn net(&self) -> Decimal {
        self.income.saturating_sub(self.expense)
    }

    /// `(income - expense) / income`, or zero when there is no income.
    pub fn savings_rate(&self) -> Decimal {
        if self.income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let net = self.net();
        net.checked_div(self.income).unwrap_or(if net.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    }

    fn record(&mut self, amount: Decimal) {
        if amount > Decimal::ZERO {
            self.income = self.income.saturating_add(amount);
        } else if amount < Decimal::ZERO {
            self.expense = self.expense.saturating_sub(amount);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyRate {
    pub month: MonthKey,
    pub rate: Decimal,
}

pub type CategoryTotals = BTreeMap<Category, Decimal>;

/// One point per transaction, sorted by date; insertion order breaks ties.
pub fn running_balance(ledger: &Ledger) -> Vec<BalancePoint> {
    let mut ordered: Vec<&Transaction> = ledger.all().iter().collect();
    // `sort_by_key` is stable, so same-day entries keep their insertion order.
    ordered.sort_by_key(|tx| tx.date());

    let mut balance = Decimal::ZERO;
    ordered
        .into_iter()
        .map(|tx| {
            balance = balance.saturating_add(tx.amount());
            BalancePoint {
                date: tx.date(),
                balance,
            }
        })
        .collect()
}

/// Months without transactions are absent.
pub fn monthly_income_expense(ledger: &Ledger) -> BTreeMap<MonthKey, IncomeExpense> {
    let mut map: BTreeMap<MonthKey, IncomeExpense> = BTreeMap::new();
    for tx in ledger {
        map.entry(tx.month()).or_default().record(tx.amount());
    }
    map
}

/// Signed net amount per category per month.
pub fn monthly_category_breakdown(ledger: &Ledger) -> BTreeMap<MonthKey, CategoryTotals> {
    let mut map: BTreeMap<MonthKey, CategoryTotals> = BTreeMap::new();
    for tx in ledger {
        let total = map
            .entry(tx.month())
            .or_default()
            .entry(tx.category().clone())
            .or_insert(Decimal::ZERO);
        *total = total.saturating_add(tx.amount());
    }
    map
}

/// Signed net amount per category for the month containing `reference`.
pub fn current_month_breakdown(ledger: &Ledger, reference: NaiveDate) -> CategoryTotals {
    let month = MonthKey::of(reference);
    let mut totals = CategoryTotals::new();
    for tx in ledger.all().iter().filter(|tx| month.contains(tx.date())) {
        let total = totals.entry(tx.category().clone()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(tx.amount());
    }
    totals
}

/// Savings rate per month in ascending month order. Months without income rate `0`.
pub fn savings_rate(ledger: &Ledger) -> Vec<MonthlyRate> {
    monthly_income_expense(ledger)
        .into_iter()
        .map(|(month, flows)| MonthlyRate {
            month,
            rate: flows.savings_rate(),
        })
        .collect()
}

/// Expenses only, as positive magnitudes; categories without spending are dropped.
pub fn spending_only(totals: &CategoryTotals) -> CategoryTotals {
    totals
        .iter()
        .filter(|(_, amount)| **amount < Decimal::ZERO)
        .map(|(cat, amount)| (cat.clone(), -*amount))
        .collect()
}

/// Like [`monthly_category_breakdown`] but only counting negative amounts, as magnitudes.
pub fn monthly_spending_by_category(ledger: &Ledger) -> BTreeMap<MonthKey, CategoryTotals> {
    let mut map: BTreeMap<MonthKey, CategoryTotals> = BTreeMap::new();
    for tx in ledger.all().iter().filter(|tx| tx.is_expense()) {
        let spent = map
            .entry(tx.month())
            .or_default()
            .entry(tx.category().clone())
            .or_insert(Decimal::ZERO);
        *spent = spent.saturating_sub(tx.amount());
    }
    map
}

/// Sum that clamps to the `Decimal` range instead of panicking.
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}
