mod chart;
mod commands;
mod output;
mod xml_output;

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use stockpos_lib::CachedClient;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stockpos")]
#[command(about = "Rank stocks by their distance from period lows and highs")]
struct Cli {
    /// Output format: table, json, csv, markdown, or xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize and rank tickers by min/max positioning
    Summary(commands::summary::SummaryArgs),
    /// Check tickers against the market-data provider
    Validate(commands::validate::ValidateArgs),
    /// Dump the daily OHLC series for one ticker
    History(commands::history::HistoryArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stockpos=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "table" => OutputFormat::Table,
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        "xml" => OutputFormat::Xml,
        other => bail!("unknown output format '{}'", other),
    };

    let client = CachedClient::new(Duration::from_secs(3600));

    match &cli.command {
        Commands::Summary(args) => commands::summary::run(args, &client, &format).await?,
        Commands::Validate(args) => commands::validate::run(args, &client, &format).await?,
        Commands::History(args) => commands::history::run(args, &client, &format).await?,
    }

    Ok(())
}
