use serde::Serialize;

use super::amount::Amount;
use super::date::StatementDate;

/// One normalized statement line, ready for aggregation and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    date: StatementDate,
    store: String,
    amount: Amount,
    source: String,
}

impl TransactionRecord {
    pub fn new(date: StatementDate, store: &str, amount: Amount, source: &str) -> Self {
        TransactionRecord {
            date,
            store: store.to_string(),
            amount,
            source: source.to_string(),
        }
    }

    pub fn date(&self) -> &StatementDate {
        &self.date
    }

    /// Payee as printed on the statement; may be empty.
    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Label of the input this record came from, usually a file name.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Stable sort by posting date; rows sharing a date keep their input order.
pub fn sort_by_date(records: &mut [TransactionRecord]) {
    records.sort_by(|a, b| a.date.cmp(&b.date));
}
