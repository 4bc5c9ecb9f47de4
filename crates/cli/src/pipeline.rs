use meisai_core::{sort_by_date, summarize, ExportConfig, Summary, TransactionRecord};
use meisai_import::import::import_statement;
use meisai_import::{DetectedEncoding, MappingReport};

use crate::batch::{BatchReadFailure, FailurePolicy, InputSource, SourceReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub policy: FailurePolicy,
    /// Stable-sort the combined records by date before export.
    pub sort: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            policy: FailurePolicy::FailFast,
            sort: true,
        }
    }
}

/// Per-source result of a batch read.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub source: InputSource,
    pub encoding: DetectedEncoding,
    pub report: MappingReport,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<TransactionRecord>,
    pub files: Vec<FileOutcome>,
    /// Always empty under [`FailurePolicy::FailFast`].
    pub failures: Vec<(InputSource, BatchReadFailure)>,
}

/// Read, decode, tokenize and map each source in order, one at a time.
///
/// Under `FailFast` the first unreadable source aborts the batch and nothing
/// read so far is returned.
pub async fn load_batch(
    reader: &SourceReader,
    sources: &[InputSource],
    options: &ConvertOptions,
) -> Result<BatchOutcome, BatchReadFailure> {
    let mut outcome = BatchOutcome::default();

    for source in sources {
        let bytes = match reader.read(source).await {
            Ok(bytes) => bytes,
            Err(e) => match options.policy {
                FailurePolicy::FailFast => {
                    tracing::error!(%source, error = %e, "statement read failed, abandoning batch");
                    return Err(e);
                }
                FailurePolicy::KeepGoing => {
                    tracing::error!(%source, error = %e, "statement read failed, skipping");
                    outcome.failures.push((source.clone(), e));
                    continue;
                }
            },
        };

        let (records, file) = convert_bytes(source, &bytes);
        tracing::info!(
            %source,
            encoding = file.encoding.label(),
            records = records.len(),
            "loaded statement"
        );
        outcome.records.extend(records);
        outcome.files.push(file);
    }

    if options.sort {
        sort_by_date(&mut outcome.records);
    }

    Ok(outcome)
}

/// The synchronous core: bytes to records for one source.
pub fn convert_bytes(source: &InputSource, bytes: &[u8]) -> (Vec<TransactionRecord>, FileOutcome) {
    let imported = import_statement(bytes, &source.label());
    let file = FileOutcome {
        source: source.clone(),
        encoding: imported.encoding,
        report: imported.report,
    };
    (imported.records, file)
}

/// Output document plus the figures shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Empty when there is nothing to export.
    pub document: String,
    pub summary: Summary,
}

impl Conversion {
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }
}

pub fn export(records: &[TransactionRecord], config: &ExportConfig) -> Conversion {
    Conversion {
        document: meisai_export::render(records, config),
        summary: summarize(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source(name: &str) -> InputSource {
        InputSource::File(PathBuf::from(format!("/statements/{name}")))
    }

    #[test]
    fn convert_bytes_labels_records_with_file_name() {
        let (records, file) = convert_bytes(&source("jan.csv"), b"2024/01/05,Shop,,,,700\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source(), "jan.csv");
        assert_eq!(file.report.mapped, 1);
        assert_eq!(file.encoding, DetectedEncoding::ShiftJis);
    }

    #[test]
    fn export_of_nothing_is_empty() {
        let conversion = export(&[], &ExportConfig::default());
        assert!(conversion.is_empty());
        assert_eq!(conversion.summary.count, 0);
    }

    #[test]
    fn export_summarizes_what_it_renders() {
        let (records, _) = convert_bytes(
            &source("a.csv"),
            b"2024/02/01,Shop A,,,,1000\n2024/02/02,Shop B,,,,2000\n",
        );
        let conversion = export(&records, &ExportConfig::default());
        assert_eq!(conversion.summary.count, 2);
        assert_eq!(conversion.summary.total.to_string(), "3000");
        assert_eq!(conversion.document.split("\r\n").count(), 3);
    }

    #[tokio::test]
    async fn empty_batch_is_empty_outcome() {
        let outcome = load_batch(&SourceReader::new(), &[], &ConvertOptions::default())
            .await
            .unwrap();
        assert!(outcome.records.is_empty());
        assert!(outcome.files.is_empty());
    }
}
