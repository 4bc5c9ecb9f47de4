use rust_decimal::Decimal;
use serde::Serialize;

use super::record::TransactionRecord;

/// Count and total over a record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub total: Decimal,
}

/// Pure; recompute whenever the record list changes.
pub fn summarize(records: &[TransactionRecord]) -> Summary {
    Summary {
        count: records.len(),
        total: records
            .iter()
            .map(TransactionRecord::amount)
            .sum::<Decimal>()
            .normalize(),
    }
}
