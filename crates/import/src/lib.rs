pub mod encoding;
pub mod statement;
pub mod tokenizer;

pub use encoding::{decode, decode_detailed, Decoded, DetectedEncoding};
pub use statement::{map_to_records, map_with_report, parse_amount, MappingReport, SkipReason};
pub use tokenizer::parse_rows;

pub mod import {
    use crate::*;
    use meisai_core::TransactionRecord;

    #[derive(Debug, Clone)]
    pub struct ImportedStatement {
        pub records: Vec<TransactionRecord>,
        pub report: MappingReport,
        pub encoding: DetectedEncoding,
    }

    /// Bytes of one statement file to records, labelled with `source`.
    pub fn import_statement(data: &[u8], source: &str) -> ImportedStatement {
        let decoded = decode_detailed(data);
        let rows = parse_rows(&decoded.text);
        let (records, report) = map_with_report(&rows, source);
        ImportedStatement {
            records,
            report,
            encoding: decoded.encoding,
        }
    }
}
