//! Command-line arguments for `meisai`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use meisai_cli::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "meisai",
    version,
    about = "Convert credit-card statement CSV into a ledger import file",
    long_about = "Convert credit-card statement CSV exports (Shift_JIS or UTF-8) into the\n\
                  16-column CSV accepted by the ledger application's importer."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less log output (errors only).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert statement files into one import document.
    Convert(ConvertArgs),

    /// Print transaction count and total without writing a document.
    Summary(SummaryArgs),

    /// Fetch a sample statement over HTTP and convert it.
    Sample(SampleArgs),

    /// Print the effective export configuration as TOML.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct BatchArgs {
    /// Statement files (or http(s) URLs), processed in the order given.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Keep records from readable files when another file fails.
    #[arg(long = "keep-going")]
    pub keep_going: bool,

    /// Keep input order instead of sorting by date.
    #[arg(long = "no-sort")]
    pub no_sort: bool,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Write the document here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export configuration file (TOML).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Args)]
pub struct OverrideArgs {
    /// Override the method column.
    #[arg(long)]
    pub method: Option<String>,

    /// Override the category column.
    #[arg(long)]
    pub category: Option<String>,

    /// Override the category detail column.
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Override the payment source column.
    #[arg(long = "payment-source")]
    pub payment_source: Option<String>,

    /// Override the currency column.
    #[arg(long)]
    pub currency: Option<String>,

    /// Prefix placed before the store name in the item column.
    #[arg(long = "item-prefix")]
    pub item_prefix: Option<String>,

    /// Text placed at the start of every memo.
    #[arg(long = "memo-prefix")]
    pub memo_prefix: Option<String>,

    /// Leave the source file name out of the memo.
    #[arg(long = "no-source-memo")]
    pub no_source_memo: bool,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        ConfigOverrides {
            method: args.method,
            category: args.category,
            subcategory: args.subcategory,
            payment_source: args.payment_source,
            currency: args.currency,
            item_prefix: args.item_prefix,
            memo_prefix: args.memo_prefix,
            no_source_memo: args.no_source_memo,
        }
    }
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SampleArgs {
    /// URL of the sample statement.
    #[arg(value_name = "URL")]
    pub url: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Export configuration file (TOML).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print built-in defaults, ignoring any config file.
    #[arg(long)]
    pub default: bool,
}
