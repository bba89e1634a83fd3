// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::display;
use crate::engine;
use crate::ledger::Ledger;
use crate::models::{parse_amount, parse_entry_date, Category, Transaction};
use crate::store::LedgerStore;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::io::{BufRead, Write};

const MENU: &str = "\nOptions:\n\
1. View Dashboard\n\
2. Add Transaction\n\
3. View Recent Transactions\n\
4. View Monthly Summary\n\
5. Exit";

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Interactive menu loop. Holds the current ledger snapshot and replaces it after each append.
pub struct Shell<'a, R, W, S> {
    input: R,
    output: W,
    store: &'a S,
    config: &'a Config,
    ledger: Ledger,
    clock: fn() -> NaiveDate,
}

impl<'a, R: BufRead, W: Write, S: LedgerStore> Shell<'a, R, W, S> {
    pub fn new(input: R, output: W, store: &'a S, config: &'a Config, ledger: Ledger) -> Self {
        Self {
            input,
            output,
            store,
            config,
            ledger,
            clock: local_today,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Runs until the user exits or input ends, returning the final ledger.
    pub fn run(mut self) -> Result<Ledger> {
        writeln!(self.output, "\n===== Personal Finance Dashboard =====")?;
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("\nEnter your choice (1-5): ")? else {
                break;
            };
            tracing::debug!(choice = %choice, "menu selection");
            match choice.as_str() {
                "1" => self.show_dashboard()?,
                "2" => self.add_transaction()?,
                "3" => self.show_recent()?,
                "4" => self.show_summary()?,
                "5" => {
                    writeln!(self.output, "\nExiting Personal Finance Dashboard. Goodbye!")?;
                    break;
                }
                _ => writeln!(
                    self.output,
                    "Invalid choice. Please enter a number between 1 and 5."
                )?,
            }
        }
        Ok(self.ledger)
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        Ok(self.prompt_line(label)?.map(|line| line.trim().to_string()))
    }

    /// Like [`Self::prompt`] but only strips the line terminator.
    fn prompt_line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let end = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(end);
        Ok(Some(line))
    }

    fn show_dashboard(&mut self) -> Result<()> {
        let report = display::dashboard(&self.ledger, (self.clock)(), self.config);
        writeln!(self.output, "\n{}", report)?;
        Ok(())
    }

    fn show_recent(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Recent Transactions ---")?;
        let recent = self.ledger.recent(self.config.recent_limit);
        if recent.is_empty() {
            writeln!(self.output, "No transactions recorded yet.")?;
        } else {
            writeln!(
                self.output,
                "{}",
                display::recent_table(&recent, &self.config.currency_symbol)
            )?;
        }
        Ok(())
    }

    fn show_summary(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Monthly Summary ---")?;
        let monthly = engine::monthly_income_expense(&self.ledger);
        if monthly.is_empty() {
            writeln!(self.output, "No data available for monthly summary.")?;
        } else {
            writeln!(
                self.output,
                "{}",
                display::summary_table(&monthly, &self.config.currency_symbol, monthly.len())
            )?;
        }
        Ok(())
    }

    fn add_transaction(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Add New Transaction ---")?;
        let today = (self.clock)();

        let date_raw = loop {
            let Some(raw) = self.prompt("Date (YYYY-MM-DD, leave blank for today): ")? else {
                return Ok(());
            };
            match parse_entry_date(&raw, today) {
                Ok(_) => break raw,
                Err(e) => self.reject(&e)?,
            }
        };

        let amount_raw = loop {
            let Some(raw) = self.prompt("Amount (positive for income, negative for expense): ")?
            else {
                return Ok(());
            };
            match parse_amount(&raw) {
                Ok(_) => break raw,
                Err(e) => self.reject(&e)?,
            }
        };

        writeln!(
            self.output,
            "\nCategories: {}",
            self.config.categories.join(", ")
        )?;
        let category_raw = loop {
            let Some(raw) = self.prompt("Category: ")? else {
                return Ok(());
            };
            match Category::parse(&raw) {
                Ok(_) => break raw,
                Err(e) => self.reject(&e)?,
            }
        };

        let Some(description) = self.prompt_line("Description: ")? else {
            return Ok(());
        };

        let tx = Transaction::normalize(&date_raw, &amount_raw, &category_raw, &description, today)?;
        if let Err(e) = self.store.append(&tx) {
            tracing::error!(error = %e, "failed to persist transaction");
            writeln!(self.output, "Could not save transaction: {}", e)?;
            return Ok(());
        }
        self.ledger = std::mem::take(&mut self.ledger).append(tx);
        writeln!(self.output, "Transaction added successfully!")?;
        Ok(())
    }

    fn reject(&mut self, err: &crate::errors::ValidationError) -> Result<()> {
        tracing::debug!(error = %err, "rejected input");
        writeln!(self.output, "{}. Please try again.", err)?;
        Ok(())
    }
}
