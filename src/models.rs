// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::ValidationError;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Non-empty, trimmed category name. Membership in any suggestion list is not checked.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidCategory);
        }
        Ok(Category(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Calendar month used as a grouping key. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate); // always the first day of the month

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(MonthKey)
    }

    pub fn of(date: NaiveDate) -> Self {
        MonthKey(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        MonthKey::of(date) == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        parse_date(&format!("{}-01", s))
            .map(MonthKey)
            .map_err(|_| ValidationError::InvalidDate(s.to_string()))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One dated, signed ledger entry. Positive amounts are income, negative are expenses.
///
/// Fields are read-only; an edit is modelled as replacing the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    date: NaiveDate,
    amount: Decimal,
    category: Category,
    description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category,
            description: description.into(),
        }
    }

    /// Validates raw entry fields. A blank date means `today`.
    pub fn normalize(
        raw_date: &str,
        raw_amount: &str,
        raw_category: &str,
        raw_description: &str,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let date = parse_entry_date(raw_date, today)?;
        let amount = parse_amount(raw_amount)?;
        let category = Category::parse(raw_category)?;
        Ok(Self::new(date, amount, category, raw_description))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// Strict `YYYY-MM-DD`: zero-padded month and day, four-digit year.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let s = raw.trim();
    let invalid = || ValidationError::InvalidDate(s.to_string());
    let shaped = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid())
}

pub fn parse_entry_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if raw.trim().is_empty() {
        Ok(today)
    } else {
        parse_date(raw)
    }
}

/// Accepts plain decimals (`-12.50`, `+3`) and scientific notation (`1e3`).
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::InvalidAmount(s.to_string()));
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| ValidationError::InvalidAmount(s.to_string()))
}
