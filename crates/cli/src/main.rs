//! `meisai`: statement CSV to ledger import CSV.

use clap::Parser;
use meisai_cli::logging::{init_logging, level_from_flags};

mod cli;
mod commands;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(level_from_flags(cli.verbose, cli.quiet));

    let result = match cli.command {
        Command::Convert(args) => commands::run_convert(args).await,
        Command::Summary(args) => commands::run_summary(args).await,
        Command::Sample(args) => commands::run_sample(args).await,
        Command::Config(args) => commands::run_config(args),
    };

    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
