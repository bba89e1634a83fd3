// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Rejection raised while turning raw user input into a [`crate::models::Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid amount '{0}', expected a signed decimal number")]
    InvalidAmount(String),
    #[error("Category must not be empty")]
    InvalidCategory,
}

/// Failures of the flat-file ledger store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Ledger store at {} is unavailable: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Ledger store at {} is corrupt (row {row}): {reason}", path.display())]
    Corrupt {
        path: PathBuf,
        row: u64,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: impl Into<io::Error>) -> Self {
        StoreError::Unavailable {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, row: u64, reason: impl ToString) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            row,
            reason: reason.to_string(),
        }
    }
}
