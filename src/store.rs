// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::DEFAULT_CATEGORIES;
use crate::errors::StoreError;
use crate::ledger::Ledger;
use crate::models::{parse_amount, parse_date, Category, Transaction, DATE_FORMAT};
use chrono::{Days, NaiveDate};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 4] = ["date", "amount", "category", "description"];

const SAMPLE_ROWS: u64 = 30;
const TMP_SUFFIX: &str = "tmp";

/// Persistence boundary for the ledger.
pub trait LedgerStore {
    fn exists(&self) -> bool;
    fn load(&self) -> Result<Ledger, StoreError>;
    /// Replaces the stored ledger with `ledger`.
    fn save(&self, ledger: &Ledger) -> Result<(), StoreError>;
    /// Adds a single row after the existing ones.
    fn append(&self, tx: &Transaction) -> Result<(), StoreError>;
}

/// Flat CSV file, one row per transaction, with a `date,amount,category,description` header.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, err: csv::Error, row: u64) -> StoreError {
        if err.is_io_error() {
            StoreError::unavailable(&self.path, err)
        } else {
            StoreError::corrupt(&self.path, row, err)
        }
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| StoreError::unavailable(parent, e))
            }
            _ => Ok(()),
        }
    }

    fn ends_with_newline(&self, file: &mut File) -> Result<bool, StoreError> {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(|e| StoreError::unavailable(&self.path, e))?;
        Ok(last[0] == b'\n')
    }
}

impl LedgerStore for CsvStore {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<Ledger, StoreError> {
        let file = File::open(&self.path).map_err(|e| StoreError::unavailable(&self.path, e))?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers().map_err(|e| self.read_error(e, 1))?.clone();
        if headers.is_empty() {
            tracing::debug!(path = %self.path.display(), "ledger store is empty");
            return Ok(Ledger::new());
        }
        check_header(&headers).map_err(|reason| StoreError::corrupt(&self.path, 1, reason))?;

        let mut ledger = Ledger::new();
        for (idx, result) in rdr.records().enumerate() {
            // header is row 1
            let row = idx as u64 + 2;
            let rec = result.map_err(|e| self.read_error(e, row))?;
            let tx = parse_row(&rec).map_err(|reason| StoreError::corrupt(&self.path, row, reason))?;
            ledger = ledger.append(tx);
        }
        tracing::info!(path = %self.path.display(), rows = ledger.len(), "loaded ledger");
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        self.ensure_parent()?;
        let tmp = tmp_path(&self.path);
        let mut wtr = WriterBuilder::new()
            .from_path(&tmp)
            .map_err(|e| StoreError::unavailable(&tmp, e))?;
        wtr.write_record(HEADER)
            .map_err(|e| StoreError::unavailable(&tmp, e))?;
        for tx in ledger {
            wtr.write_record(to_row(tx))
                .map_err(|e| StoreError::unavailable(&tmp, e))?;
        }
        wtr.flush().map_err(|e| StoreError::unavailable(&tmp, e))?;
        drop(wtr);
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::unavailable(&self.path, e))?;
        tracing::info!(path = %self.path.display(), rows = ledger.len(), "saved ledger");
        Ok(())
    }

    fn append(&self, tx: &Transaction) -> Result<(), StoreError> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::unavailable(&self.path, e))?;
        let len = file
            .metadata()
            .map_err(|e| StoreError::unavailable(&self.path, e))?
            .len();
        let fresh = len == 0;
        if !fresh && !self.ends_with_newline(&mut file)? {
            // A hand-edited file may lack the final record terminator.
            file.write_all(b"\n")
                .map_err(|e| StoreError::unavailable(&self.path, e))?;
        }

        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        if fresh {
            wtr.write_record(HEADER)
                .map_err(|e| StoreError::unavailable(&self.path, e))?;
        }
        wtr.write_record(to_row(tx))
            .map_err(|e| StoreError::unavailable(&self.path, e))?;
        wtr.flush().map_err(|e| StoreError::unavailable(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), date = %tx.date(), "appended transaction");
        Ok(())
    }
}

/// Loads the ledger, seeding the store with [`sample_ledger`] when it does not exist yet.
pub fn open_or_init<S: LedgerStore>(
    store: &S,
    today: NaiveDate,
    categories: &[String],
) -> Result<Ledger, StoreError> {
    if store.exists() {
        return store.load();
    }
    let ledger = sample_ledger(today, categories);
    store.save(&ledger)?;
    tracing::info!(rows = ledger.len(), "seeded new ledger with sample data");
    Ok(ledger)
}

/// Thirty deterministic rows, one per day over the thirty days before `anchor`.
///
/// Rows in the `Income` category are positive, every other category is an expense.
pub fn sample_ledger(anchor: NaiveDate, categories: &[String]) -> Ledger {
    let mut cats: Vec<Category> = categories
        .iter()
        .filter_map(|c| Category::parse(c).ok())
        .collect();
    if cats.is_empty() {
        cats = DEFAULT_CATEGORIES
            .iter()
            .filter_map(|c| Category::parse(c).ok())
            .collect();
    }

    (1..=SAMPLE_ROWS)
        .filter_map(|i| {
            let date = anchor.checked_sub_days(Days::new(SAMPLE_ROWS + 1 - i))?;
            let category = cats[(i as usize * 7) % cats.len()].clone();
            let magnitude = Decimal::from((i * 37) % 100 + 1);
            let amount = if category.as_str().eq_ignore_ascii_case("income") {
                magnitude * Decimal::from(25)
            } else {
                -magnitude
            };
            Some(Transaction::new(
                date,
                amount,
                category,
                format!("Sample Transaction {}", i),
            ))
        })
        .collect()
}

fn check_header(headers: &StringRecord) -> Result<(), String> {
    let matches = headers.len() == HEADER.len()
        && headers
            .iter()
            .zip(HEADER)
            .all(|(got, want)| got.trim().eq_ignore_ascii_case(want));
    if matches {
        Ok(())
    } else {
        Err(format!(
            "unexpected header '{}', expected '{}'",
            headers.iter().collect::<Vec<_>>().join(","),
            HEADER.join(",")
        ))
    }
}

fn parse_row(rec: &StringRecord) -> Result<Transaction, String> {
    let field = |i: usize| rec.get(i).unwrap_or("");
    let date_raw = field(0).trim();
    if date_raw.is_empty() {
        return Err("missing date".into());
    }
    let date = parse_stored_date(date_raw).map_err(|e| e.to_string())?;
    let amount = parse_amount(field(1)).map_err(|e| e.to_string())?;
    let category = Category::parse(field(2)).map_err(|e| e.to_string())?;
    Ok(Transaction::new(date, amount, category, field(3)))
}

/// Also accepts a trailing time component (`2024-01-05 10:30:00`), which is dropped.
fn parse_stored_date(raw: &str) -> Result<NaiveDate, crate::errors::ValidationError> {
    parse_date(raw).or_else(|err| match raw.as_bytes().get(10) {
        Some(b' ') | Some(b'T') => parse_date(&raw[..10]).map_err(|_| err),
        _ => Err(err),
    })
}

fn to_row(tx: &Transaction) -> [String; 4] {
    [
        tx.date().format(DATE_FORMAT).to_string(),
        tx.amount().to_string(),
        tx.category().to_string(),
        tx.description().to_string(),
    ]
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
