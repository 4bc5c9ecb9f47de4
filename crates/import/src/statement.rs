use meisai_core::{Amount, StatementDate, TransactionRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE_COLUMN: usize = 0;
const STORE_COLUMN: usize = 1;
const FALLBACK_AMOUNT_COLUMN: usize = 2;
const AMOUNT_COLUMN: usize = 5;

/// Why a row did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Column 0 is not a `YYYY/MM/DD` or `YYYY-MM-DD` date (headers, footers, totals).
    NotADate,
    /// The amount parsed to exactly zero.
    ZeroAmount,
    /// Nothing numeric was left after stripping the amount text.
    UnparsableAmount,
}

/// Per-call skip counts. Unparsable and zero amounts are both dropped but
/// counted separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingReport {
    pub mapped: usize,
    pub not_a_date: usize,
    pub zero_amount: usize,
    pub unparsable_amount: usize,
}

impl MappingReport {
    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NotADate => self.not_a_date += 1,
            SkipReason::ZeroAmount => self.zero_amount += 1,
            SkipReason::UnparsableAmount => self.unparsable_amount += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.not_a_date + self.zero_amount + self.unparsable_amount
    }
}

/// Map raw statement rows to records, dropping anything that is not a
/// dated, non-zero charge. Output order follows row order.
pub fn map_to_records(rows: &[Vec<String>], source: &str) -> Vec<TransactionRecord> {
    map_with_report(rows, source).0
}

pub fn map_with_report(
    rows: &[Vec<String>],
    source: &str,
) -> (Vec<TransactionRecord>, MappingReport) {
    let mut records = Vec::new();
    let mut report = MappingReport::default();

    for (index, row) in rows.iter().enumerate() {
        match map_row(row, source) {
            Ok(record) => {
                report.mapped += 1;
                records.push(record);
            }
            Err(reason) => {
                tracing::trace!(row = index, ?reason, "skipped statement row");
                report.record_skip(reason);
            }
        }
    }

    tracing::debug!(
        source,
        mapped = report.mapped,
        not_a_date = report.not_a_date,
        zero_amount = report.zero_amount,
        unparsable_amount = report.unparsable_amount,
        "mapped statement rows"
    );

    (records, report)
}

fn map_row(row: &[String], source: &str) -> Result<TransactionRecord, SkipReason> {
    let date = StatementDate::parse(column(row, DATE_COLUMN)).ok_or(SkipReason::NotADate)?;
    let store = column(row, STORE_COLUMN).trim();

    let amount_text = match row.get(AMOUNT_COLUMN) {
        Some(s) if !s.is_empty() => s.as_str(),
        _ => column(row, FALLBACK_AMOUNT_COLUMN),
    };

    let amount = match try_parse_amount(amount_text) {
        None => return Err(SkipReason::UnparsableAmount),
        Some(value) => Amount::new(value).ok_or(SkipReason::ZeroAmount)?,
    };

    Ok(TransactionRecord::new(date, store, amount, source))
}

fn column(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or_default()
}

/// Magnitude of a statement amount such as `¥1,234`, `-500` or `1,234円`.
/// Anything that does not parse counts as zero, so the result is never negative.
///
/// The stripped text must be a valid `Decimal`: a sign anywhere but the front
/// (`12.50-`) or more than 28 significant digits yields zero.
pub fn parse_amount(s: &str) -> Decimal {
    try_parse_amount(s).unwrap_or(Decimal::ZERO)
}

fn try_parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    Decimal::from_str(&cleaned).ok().map(|d| d.abs())
}
