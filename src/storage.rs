use std::collections::HashMap;
use std::io::{self, BufRead};
use log::{debug, trace};
use crate::error::Result;
use crate::transaction::{parse_line, Transaction, TransactionRef};

/// Running total of every transaction folded for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountAggregate {
    pub account_id: String,
    pub total_amount: f64,
}

impl AccountAggregate {
    pub fn new(account_id: impl Into<String>, total_amount: f64) -> Self {
        AccountAggregate {
            account_id: account_id.into(),
            total_amount,
        }
    }
}

/// Read side of an aggregated transaction log.
pub trait Storage {
    /// Per-account totals, in no particular order.
    fn aggregates(&self) -> Vec<AccountAggregate>;

    /// The highest transaction seen, first occurrence on ties. `None` when nothing was folded.
    fn highest_transaction(&self) -> Option<&Transaction>;

    /// Number of lines that parsed into a transaction.
    fn transaction_count(&self) -> usize;
}

/// In-memory aggregate of a transaction log, built in a single pass.
///
/// Construction drains the whole source; the storage is read-only afterwards.
/// Lines the parser rejects are dropped without an error, only counted in
/// [`TransactionStorage::skipped_lines`].
#[derive(Debug, Default)]
pub struct TransactionStorage {
    totals: HashMap<String, f64>,
    highest: Option<Transaction>,
    transaction_count: usize,
    skipped_lines: usize,
}

impl TransactionStorage {
    /// Folds every line of `reader`, reusing one line buffer for the whole read.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut storage = TransactionStorage::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }

            match std::str::from_utf8(strip_line_ending(&line)) {
                Ok(text) => storage.ingest_line(text),
                Err(e) => {
                    storage.skipped_lines += 1;
                    trace!("Skipping transaction line that is not valid UTF-8: {}", e);
                }
            }
        }

        storage.log_summary();
        Ok(storage)
    }

    /// Folds a fallible line source. The first error aborts construction.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        let mut storage = TransactionStorage::default();
        for line in lines {
            storage.ingest_line(line?.as_ref());
        }

        storage.log_summary();
        Ok(storage)
    }

    pub fn from_records<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut storage = TransactionStorage::default();
        for line in lines {
            storage.ingest_line(line.as_ref());
        }

        storage.log_summary();
        storage
    }

    /// Non-blank lines that could not be parsed.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    fn ingest_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        match parse_line(line) {
            Some(transaction) => self.fold(transaction),
            None => {
                self.skipped_lines += 1;
                trace!("Skipping malformed transaction line: {:?}", line);
            }
        }
    }

    #[inline]
    fn fold(&mut self, transaction: TransactionRef<'_>) {
        self.transaction_count += 1;

        match self.totals.get_mut(transaction.account_id) {
            Some(total) => *total += transaction.amount,
            None => {
                self.totals.insert(transaction.account_id.to_owned(), transaction.amount);
            }
        }

        // Strict comparison keeps the first of several equal maxima.
        if self.highest.as_ref().is_none_or(|highest| transaction.amount > highest.amount) {
            self.highest = Some(transaction.to_owned_transaction());
        }
    }

    fn log_summary(&self) {
        debug!(
            "Folded {} transactions into {} accounts ({} lines skipped). Highest: {:?}",
            self.transaction_count,
            self.totals.len(),
            self.skipped_lines,
            self.highest
        );
    }
}

impl Storage for TransactionStorage {
    fn aggregates(&self) -> Vec<AccountAggregate> {
        self.totals
            .iter()
            .map(|(account_id, &total_amount)| AccountAggregate::new(account_id.as_str(), total_amount))
            .collect()
    }

    fn highest_transaction(&self) -> Option<&Transaction> {
        self.highest.as_ref()
    }

    fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
