// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use rust_decimal::Decimal;

/// Insertion-ordered sequence of transactions. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ledger with `tx` placed after every existing entry.
    #[must_use]
    pub fn append(mut self, tx: Transaction) -> Self {
        self.transactions.push(tx);
        self
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn total(&self) -> Decimal {
        crate::engine::saturating_sum(self.transactions.iter().map(Transaction::amount))
    }

    /// Up to `limit` entries, newest date first; later insertions win ties.
    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        let mut items: Vec<(usize, &Transaction)> = self.transactions.iter().enumerate().collect();
        items.sort_by(|(ia, a), (ib, b)| b.date().cmp(&a.date()).then(ib.cmp(ia)));
        items.into_iter().take(limit).map(|(_, tx)| tx).collect()
    }
}

impl FromIterator<Transaction> for Ledger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Transaction>> for Ledger {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
