//! The `history` subcommand: dumps the daily OHLC series for one ticker.

use anyhow::{bail, Result};
use clap::Args;

use stockpos_lib::{validation, CachedClient};

use crate::output::{
    print_history_csv, print_history_markdown, print_history_table, print_history_xml, print_json,
    OutputFormat,
};

/// Arguments for the `history` subcommand.
#[derive(Args)]
pub struct HistoryArgs {
    /// Ticker symbol
    #[arg(value_name = "TICKER")]
    pub ticker: String,

    /// Window start (YYYY-MM-DD)
    #[arg(long, conflicts_with = "days")]
    pub since: Option<String>,

    /// Window end (YYYY-MM-DD), defaults to today
    #[arg(long, conflicts_with = "days")]
    pub until: Option<String>,

    /// Trailing window in days (default 365)
    #[arg(long)]
    pub days: Option<u32>,
}

pub async fn run(args: &HistoryArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let ticker = validation::normalize_ticker(&args.ticker)?;
    let (start, end) =
        super::resolve_window(args.since.as_deref(), args.until.as_deref(), args.days)?;

    let history = client.fetch_history(&ticker, start, end).await?;
    if history.bars.is_empty() {
        bail!(
            "no price data for '{}' between {} and {}",
            ticker,
            start,
            end
        );
    }

    if matches!(format, OutputFormat::Table | OutputFormat::Markdown) {
        if let Some(name) = &history.display_name {
            println!("{} -- {}", ticker, name);
        }
    }

    match format {
        OutputFormat::Table => print_history_table(&history.bars),
        OutputFormat::Json => print_json(&history.bars),
        OutputFormat::Csv => print_history_csv(&history.bars)?,
        OutputFormat::Markdown => print_history_markdown(&history.bars),
        OutputFormat::Xml => print_history_xml(&history.bars),
    }

    Ok(())
}
