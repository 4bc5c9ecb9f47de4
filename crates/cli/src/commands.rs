use anyhow::{bail, Context, Result};
use meisai_cli::{
    export, load_batch, resolve_config, BatchOutcome, ConfigOverrides, ConvertOptions,
    FailurePolicy, InputSource, SourceReader,
};
use meisai_core::ExportConfig;
use std::path::Path;

use crate::cli::{BatchArgs, ConfigArgs, ConvertArgs, OutputArgs, SampleArgs, SummaryArgs};

/// The one message users see for unreadable input; details go to the log.
const READ_FAILURE_MESSAGE: &str = "failed to read statement files";

pub async fn run_convert(args: ConvertArgs) -> Result<()> {
    let sources = sources(&args.batch.inputs);
    let outcome = read_batch(&sources, options(&args.batch)).await?;
    write_document(&outcome, args.output).await?;
    finish(&outcome)
}

pub async fn run_sample(args: SampleArgs) -> Result<()> {
    let sources = [InputSource::Url(args.url)];
    let outcome = read_batch(&sources, ConvertOptions::default()).await?;
    write_document(&outcome, args.output).await?;
    finish(&outcome)
}

pub async fn run_summary(args: SummaryArgs) -> Result<()> {
    let sources = sources(&args.batch.inputs);
    let outcome = read_batch(&sources, options(&args.batch)).await?;
    let summary = meisai_core::summarize(&outcome.records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("count: {}", summary.count);
        println!("total: {}", summary.total);
    }
    finish(&outcome)
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    let config = if args.default {
        ExportConfig::default()
    } else {
        resolve_config(args.config.as_deref()).context("failed to load export config")?
    };
    print!("{}", config.to_toml()?);
    Ok(())
}

fn sources(inputs: &[String]) -> Vec<InputSource> {
    inputs.iter().map(|s| InputSource::parse(s)).collect()
}

fn options(args: &BatchArgs) -> ConvertOptions {
    ConvertOptions {
        policy: if args.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        },
        sort: !args.no_sort,
    }
}

async fn read_batch(sources: &[InputSource], options: ConvertOptions) -> Result<BatchOutcome> {
    let reader = SourceReader::new();
    match load_batch(&reader, sources, &options).await {
        Ok(outcome) => Ok(outcome),
        // Already logged with the failing source.
        Err(_) => bail!(READ_FAILURE_MESSAGE),
    }
}

async fn write_document(outcome: &BatchOutcome, args: OutputArgs) -> Result<()> {
    let overrides = ConfigOverrides::from(args.overrides);
    let config = overrides.apply(
        resolve_config(args.config.as_deref()).context("failed to load export config")?,
    );

    let conversion = export(&outcome.records, &config);
    if conversion.is_empty() {
        tracing::warn!("nothing to export: no transactions found");
        return Ok(());
    }

    match &args.output {
        Some(path) => write_file(path, &conversion.document).await?,
        None => print!("{}", conversion.document),
    }

    eprintln!(
        "{} transactions, total {}",
        conversion.summary.count, conversion.summary.total
    );
    Ok(())
}

async fn write_file(path: &Path, document: &str) -> Result<()> {
    tokio::fs::write(path, document)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote import document");
    Ok(())
}

/// Under `--keep-going`, a batch with failures still exits non-zero.
fn finish(outcome: &BatchOutcome) -> Result<()> {
    if outcome.failures.is_empty() {
        return Ok(());
    }
    for (source, _) in &outcome.failures {
        eprintln!("skipped: {source}");
    }
    bail!(READ_FAILURE_MESSAGE)
}
