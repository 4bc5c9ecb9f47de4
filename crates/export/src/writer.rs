use meisai_core::{ExportConfig, TransactionRecord};
use std::borrow::Cow;

/// Column labels of the ledger import format. The downstream importer
/// matches these byte for byte.
pub const HEADER: [&str; 16] = [
    "日付",
    "方法",
    "カテゴリ",
    "カテゴリの内訳",
    "支払元",
    "入金先",
    "品目",
    "メモ",
    "お店",
    "通貨",
    "収入",
    "支出",
    "振替",
    "残高調整",
    "通貨変換前の金額",
    "集計の設定",
];

/// Item label used when neither a prefix nor a store name is available.
pub const UNNAMED_ITEM: &str = "名称未設定";

const LINE_ENDING: &str = "\r\n";
const MEMO_SEPARATOR: &str = " / ";
const ZERO: &str = "0";

/// Render records as a ledger import document, rows in the order given.
///
/// Returns an empty string for an empty slice: there is nothing to import,
/// and callers should not offer a file.
pub fn render(records: &[TransactionRecord], config: &ExportConfig) -> String {
    if records.is_empty() {
        tracing::debug!("no records to render");
        return String::new();
    }

    let fixed = FixedColumns::from_config(config);
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_row(HEADER.iter().copied()));

    for record in records {
        let item = item_label(&fixed, record);
        let memo = memo_text(&fixed, config.include_source_in_memo, record);
        let amount = record.amount().to_string();

        lines.push(join_row([
            record.date().as_str(),
            fixed.method,
            fixed.category,
            fixed.subcategory,
            fixed.payment_source,
            fixed.income_target,
            &*item,
            memo.as_str(),
            record.store(),
            fixed.currency,
            ZERO,
            amount.as_str(),
            ZERO,
            ZERO,
            amount.as_str(),
            fixed.aggregation_setting,
        ]));
    }

    tracing::debug!(rows = records.len(), "rendered ledger import document");
    lines.join(LINE_ENDING)
}

/// Quote a field iff it contains a comma, a double quote or `\n`.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn join_row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(escape_field)
        .collect::<Vec<_>>()
        .join(",")
}

/// Trimmed views of the config, computed once per render.
struct FixedColumns<'a> {
    method: &'a str,
    category: &'a str,
    subcategory: &'a str,
    payment_source: &'a str,
    income_target: &'a str,
    currency: &'a str,
    aggregation_setting: &'a str,
    item_prefix: &'a str,
    memo_prefix: &'a str,
}

impl<'a> FixedColumns<'a> {
    fn from_config(config: &'a ExportConfig) -> Self {
        Self {
            method: config.method.trim(),
            category: config.category.trim(),
            subcategory: config.subcategory.trim(),
            payment_source: config.payment_source.trim(),
            income_target: config.income_target.trim(),
            currency: config.currency.trim(),
            aggregation_setting: config.aggregation_setting.trim(),
            item_prefix: config.item_prefix.trim(),
            memo_prefix: config.memo_prefix.trim(),
        }
    }
}

fn item_label<'a>(fixed: &FixedColumns<'_>, record: &'a TransactionRecord) -> Cow<'a, str> {
    let store = record.store();
    if !fixed.item_prefix.is_empty() {
        Cow::Owned(format!("{} {}", fixed.item_prefix, store).trim().to_string())
    } else if !store.trim().is_empty() {
        Cow::Borrowed(store)
    } else {
        Cow::Borrowed(UNNAMED_ITEM)
    }
}

fn memo_text(fixed: &FixedColumns<'_>, include_source: bool, record: &TransactionRecord) -> String {
    let mut parts = Vec::with_capacity(2);
    if !fixed.memo_prefix.is_empty() {
        parts.push(fixed.memo_prefix);
    }
    let source = record.source();
    if include_source && !source.trim().is_empty() {
        parts.push(source);
    }
    parts.join(MEMO_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meisai_core::{Amount, StatementDate};
    use meisai_import::parse_rows;

    fn record(date: &str, store: &str, units: u64, source: &str) -> TransactionRecord {
        TransactionRecord::new(
            StatementDate::parse(date).unwrap(),
            store,
            Amount::from_units(units).unwrap(),
            source,
        )
    }

    fn data_rows(doc: &str) -> Vec<Vec<String>> {
        parse_rows(doc).into_iter().skip(1).collect()
    }

    const ITEM: usize = 6;
    const MEMO: usize = 7;
    const STORE: usize = 8;
    const INCOME: usize = 10;
    const EXPENSE: usize = 11;
    const TRANSFER: usize = 12;
    const ADJUSTMENT: usize = 13;
    const ORIGINAL_AMOUNT: usize = 14;

    // ── escape_field ──────────────────────────────────────────────────────────

    #[test]
    fn plain_field_is_borrowed() {
        assert!(matches!(escape_field("Shop A"), Cow::Borrowed("Shop A")));
    }

    #[test]
    fn comma_quote_newline_are_quoted() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn surrounding_spaces_alone_are_not_quoted() {
        assert_eq!(escape_field(" padded "), " padded ");
    }

    // ── render ────────────────────────────────────────────────────────────────

    #[test]
    fn empty_records_render_empty_string() {
        assert_eq!(render(&[], &ExportConfig::default()), "");
        let custom = ExportConfig {
            memo_prefix: "x".to_string(),
            ..ExportConfig::default()
        };
        assert_eq!(render(&[], &custom), "");
    }

    #[test]
    fn header_is_exact() {
        let doc = render(&[record("2024/01/01", "A", 1, "a.csv")], &ExportConfig::default());
        let header = doc.split("\r\n").next().unwrap();
        assert_eq!(
            header,
            "日付,方法,カテゴリ,カテゴリの内訳,支払元,入金先,品目,メモ,お店,通貨,収入,支出,振替,残高調整,通貨変換前の金額,集計の設定"
        );
    }

    #[test]
    fn rows_use_crlf_without_trailing_terminator() {
        let doc = render(
            &[record("2024/01/01", "A", 1, "a.csv"), record("2024/01/02", "B", 2, "a.csv")],
            &ExportConfig::default(),
        );
        assert_eq!(doc.matches("\r\n").count(), 2);
        assert!(!doc.ends_with('\n'));
        assert!(!doc.contains("\n\n"));
    }

    #[test]
    fn full_row_with_defaults() {
        let doc = render(&[record("2024/01/15", "Shop", 1234, "jan.csv")], &ExportConfig::default());
        let line = doc.split("\r\n").nth(1).unwrap();
        assert_eq!(
            line,
            "2024-01-15,payment,その他,その他,クレジットカード,,Shop,カード明細取込 / jan.csv,Shop,JPY,0,1234,0,0,1234,常に集計に含める"
        );
    }

    #[test]
    fn amount_columns_are_zero_filled() {
        let doc = render(&[record("2024/01/15", "Shop", 980, "a.csv")], &ExportConfig::default());
        let row = &data_rows(&doc)[0];
        assert_eq!(row.len(), 16);
        assert_eq!(row[INCOME], "0");
        assert_eq!(row[EXPENSE], "980");
        assert_eq!(row[TRANSFER], "0");
        assert_eq!(row[ADJUSTMENT], "0");
        assert_eq!(row[ORIGINAL_AMOUNT], "980");
    }

    #[test]
    fn config_fields_are_trimmed() {
        let config = ExportConfig {
            method: "  payment ".to_string(),
            currency: " USD\t".to_string(),
            ..ExportConfig::default()
        };
        let doc = render(&[record("2024/01/15", "Shop", 1, "a.csv")], &config);
        let row = &data_rows(&doc)[0];
        assert_eq!(row[1], "payment");
        assert_eq!(row[9], "USD");
    }

    #[test]
    fn records_keep_given_order() {
        let doc = render(
            &[record("2024/03/01", "Late", 1, "a.csv"), record("2024/01/01", "Early", 2, "a.csv")],
            &ExportConfig::default(),
        );
        let rows = data_rows(&doc);
        assert_eq!(rows[0][STORE], "Late");
        assert_eq!(rows[1][STORE], "Early");
    }

    // ── item ──────────────────────────────────────────────────────────────────

    #[test]
    fn item_uses_prefix_and_store() {
        let config = ExportConfig {
            item_prefix: " カード ".to_string(),
            ..ExportConfig::default()
        };
        let doc = render(&[record("2024/01/15", "Shop", 1, "a.csv")], &config);
        assert_eq!(data_rows(&doc)[0][ITEM], "カード Shop");
    }

    #[test]
    fn item_with_prefix_and_empty_store_is_prefix() {
        let config = ExportConfig {
            item_prefix: "カード".to_string(),
            ..ExportConfig::default()
        };
        let doc = render(&[record("2024/01/15", "", 1, "a.csv")], &config);
        assert_eq!(data_rows(&doc)[0][ITEM], "カード");
    }

    #[test]
    fn item_falls_back_to_store_then_unnamed() {
        let doc = render(
            &[record("2024/01/15", "Shop", 1, "a.csv"), record("2024/01/15", "", 1, "a.csv")],
            &ExportConfig::default(),
        );
        let rows = data_rows(&doc);
        assert_eq!(rows[0][ITEM], "Shop");
        assert_eq!(rows[1][ITEM], UNNAMED_ITEM);
        assert_eq!(rows[1][STORE], "");
    }

    // ── memo ──────────────────────────────────────────────────────────────────

    #[test]
    fn memo_prefix_only_when_source_excluded() {
        let config = ExportConfig {
            include_source_in_memo: false,
            ..ExportConfig::default()
        };
        let doc = render(&[record("2024/01/15", "Shop", 1, "a.csv")], &config);
        assert_eq!(data_rows(&doc)[0][MEMO], "カード明細取込");
    }

    #[test]
    fn memo_source_only_when_prefix_blank() {
        let config = ExportConfig {
            memo_prefix: "   ".to_string(),
            ..ExportConfig::default()
        };
        let doc = render(&[record("2024/01/15", "Shop", 1, "a.csv")], &config);
        assert_eq!(data_rows(&doc)[0][MEMO], "a.csv");
    }

    #[test]
    fn memo_empty_when_nothing_contributes() {
        let config = ExportConfig {
            memo_prefix: String::new(),
            include_source_in_memo: true,
            ..ExportConfig::default()
        };
        let doc = render(&[record("2024/01/15", "Shop", 1, "")], &config);
        assert_eq!(data_rows(&doc)[0][MEMO], "");
    }

    // ── round trip through the tokenizer ──────────────────────────────────────

    #[test]
    fn quoted_store_survives_tokenizer() {
        let store = "He said, \"hi\"";
        let doc = render(&[record("2024/01/15", store, 1, "a.csv")], &ExportConfig::default());
        let rows = data_rows(&doc);
        assert_eq!(rows[0][STORE], store);
        assert_eq!(rows[0][ITEM], store);
    }

    #[test]
    fn multiline_store_survives_tokenizer() {
        let store = "Line one\nLine two";
        let doc = render(&[record("2024/01/15", store, 1, "a.csv")], &ExportConfig::default());
        let rows = data_rows(&doc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][STORE], store);
    }

    // ── interop with a standard CSV reader ────────────────────────────────────

    #[test]
    fn standard_reader_sees_sixteen_columns() {
        let doc = render(
            &[
                record("2024/02/01", "Shop A", 1000, "feb.csv"),
                record("2024/02/02", "Shop, \"B\"", 2000, "feb.csv"),
            ],
            &ExportConfig::default(),
        );
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(doc.as_bytes());

        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), HEADER.to_vec());

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.len() == 16));
        assert_eq!(&records[1][STORE], "Shop, \"B\"");
        assert_eq!(&records[1][EXPENSE], "2000");
    }
}
