// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::store::{CsvStore, LedgerStore};
use anyhow::{bail, Context, Result};
use std::path::Path;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m
        .get_one::<String>("format")
        .map(|f| f.trim().to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = m
        .get_one::<String>("out")
        .map(|o| o.trim())
        .context("--out is required")?;
    export(ledger, &fmt, Path::new(out))?;
    println!("Exported {} transactions to {}", ledger.len(), out);
    Ok(())
}

/// Writes the ledger in insertion order as `csv` (store layout) or `json`.
pub fn export(ledger: &Ledger, fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => CsvStore::new(out)
            .save(ledger)
            .with_context(|| format!("Export to {}", out.display()))?,
        "json" => {
            let body = serde_json::to_string_pretty(ledger.all())?;
            std::fs::write(out, body)
                .with_context(|| format!("Export to {}", out.display()))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    tracing::info!(format = fmt, path = %out.display(), rows = ledger.len(), "exported ledger");
    Ok(())
}
