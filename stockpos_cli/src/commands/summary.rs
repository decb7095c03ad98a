//! The `summary` subcommand: ranked min/max positioning for a set of tickers.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use tokio::time::sleep;

use stockpos_lib::presets::Preset;
use stockpos_lib::{analytics, validation, CachedClient, Watchlist};

use crate::chart::render_spread_chart;
use crate::output::{
    print_json, print_summaries_csv, print_summaries_markdown, print_summaries_table,
    print_summaries_xml, OutputFormat,
};

/// Arguments for the `summary` subcommand.
///
/// Tickers come from `--ticker` flags (each accepts a `;`-separated list)
/// and/or `--preset` sets; the window from `--since`/`--until` or a
/// trailing `--days`, never both.
#[derive(Args)]
pub struct SummaryArgs {
    /// Ticker(s) to include; repeatable, accepts a ;-separated list
    #[arg(long = "ticker", value_name = "TICKERS")]
    pub tickers: Vec<String>,

    /// Add a predefined set (repeatable): global-tech, italian-banks, ftse-mib
    #[arg(long, value_name = "NAME")]
    pub preset: Vec<String>,

    /// Window start (YYYY-MM-DD)
    #[arg(long, conflicts_with = "days")]
    pub since: Option<String>,

    /// Window end (YYYY-MM-DD), defaults to today
    #[arg(long, conflicts_with = "days")]
    pub until: Option<String>,

    /// Trailing window in days (default 365)
    #[arg(long)]
    pub days: Option<u32>,

    /// Skip the positioning bar chart
    #[arg(long)]
    pub no_chart: bool,
}

pub async fn run(args: &SummaryArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let mut watchlist = Watchlist::new();
    for name in &args.preset {
        let preset: Preset = name.parse()?;
        watchlist.add_all(preset.tickers().iter().copied());
    }
    for input in &args.tickers {
        for ticker in validation::parse_ticker_list(input)? {
            watchlist.add(&ticker);
        }
    }
    if watchlist.selected().is_empty() {
        bail!("no tickers given; use --ticker or --preset");
    }

    let (start, end) = super::resolve_window(
        args.since.as_deref(),
        args.until.as_deref(),
        args.days,
    )?;

    let pb = ProgressBar::new(watchlist.selected().len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}",
        )
        .unwrap(),
    );
    pb.set_message("fetching price history...");

    let mut summaries = Vec::new();
    let mut skipped: Vec<(String, String)> = Vec::new();
    for (i, ticker) in watchlist.selected().iter().enumerate() {
        if i > 0 {
            // Jittered delay so a long preset does not hammer the provider.
            let delay_ms = rand::thread_rng().gen_range(200..500);
            sleep(Duration::from_millis(delay_ms)).await;
        }
        match client.fetch_history(ticker, start, end).await {
            Ok(history) if history.bars.is_empty() => {
                skipped.push((ticker.clone(), "no data in the requested window".to_string()));
            }
            Ok(history) => {
                match analytics::summarize(ticker, history.display_name.clone(), &history.bars) {
                    Ok(summary) => summaries.push(summary),
                    Err(e) => skipped.push((ticker.clone(), e.to_string())),
                }
            }
            Err(e) => skipped.push((ticker.clone(), e.to_string())),
        }
        pb.set_message(format!("{} ok, {} skipped", summaries.len(), skipped.len()));
        pb.inc(1);
    }
    pb.finish_and_clear();

    for (ticker, reason) in &skipped {
        eprintln!("Skipping '{}': {}", ticker, reason);
    }
    if summaries.is_empty() {
        bail!("no usable price history for any requested ticker");
    }

    let ranked = analytics::rank(summaries);

    match format {
        OutputFormat::Table => print_summaries_table(&ranked),
        OutputFormat::Json => print_json(&ranked),
        OutputFormat::Csv => print_summaries_csv(&ranked)?,
        OutputFormat::Markdown => print_summaries_markdown(&ranked),
        OutputFormat::Xml => print_summaries_xml(&ranked),
    }

    // The chart belongs to the human-readable view only.
    if !args.no_chart && matches!(format, OutputFormat::Table) {
        println!();
        print!("{}", render_spread_chart(&ranked));
    }

    Ok(())
}
