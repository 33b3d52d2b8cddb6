const DELIMITER: u8 = b',';

/// A transaction retained past the line it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub account_id: String,
    pub transaction_id: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(account_id: impl Into<String>, transaction_id: impl Into<String>, amount: f64) -> Self {
        Transaction {
            account_id: account_id.into(),
            transaction_id: transaction_id.into(),
            amount,
        }
    }
}

/// A parsed line whose id fields still point into the input buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionRef<'a> {
    pub account_id: &'a str,
    pub transaction_id: &'a str,
    pub amount: f64,
}

impl TransactionRef<'_> {
    pub fn to_owned_transaction(&self) -> Transaction {
        Transaction::new(self.account_id, self.transaction_id, self.amount)
    }
}

/// Parses one `account,transaction,amount` line.
///
/// Returns `None` for blank lines, lines with fewer than two delimiters and
/// lines whose amount is not a finite number. The id fields are borrowed
/// verbatim; only the amount is trimmed before parsing.
#[inline]
pub fn parse_line(line: &str) -> Option<TransactionRef<'_>> {
    let bytes = line.as_bytes();
    let first = bytes.iter().position(|&b| b == DELIMITER)?;
    let second = first + 1 + bytes[first + 1..].iter().position(|&b| b == DELIMITER)?;

    // Delimiters are ASCII so these are always char boundaries.
    let account_id = &line[..first];
    let transaction_id = &line[first + 1..second];
    let amount: f64 = line[second + 1..].trim().parse().ok()?;

    if !amount.is_finite() {
        return None;
    }

    Some(TransactionRef {
        account_id,
        transaction_id,
        amount,
    })
}
