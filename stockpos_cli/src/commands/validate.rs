//! The `validate` subcommand: checks tickers against the market-data provider.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use rand::Rng;
use tokio::time::sleep;

use stockpos_lib::{validation, CachedClient};

use crate::output::{
    print_validations_csv, print_validations_json, print_validations_markdown,
    print_validations_table, print_validations_xml, OutputFormat,
};

/// Arguments for the `validate` subcommand.
#[derive(Args)]
pub struct ValidateArgs {
    /// Tickers to check; each argument accepts a ;-separated list
    #[arg(value_name = "TICKERS", required = true)]
    pub tickers: Vec<String>,
}

pub async fn run(args: &ValidateArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let mut tickers: Vec<String> = Vec::new();
    for input in &args.tickers {
        for ticker in validation::parse_ticker_list(input)? {
            if !tickers.contains(&ticker) {
                tickers.push(ticker);
            }
        }
    }

    let mut outcomes: Vec<(String, bool)> = Vec::new();
    for (i, ticker) in tickers.iter().enumerate() {
        if i > 0 {
            let delay_ms = rand::thread_rng().gen_range(200..500);
            sleep(Duration::from_millis(delay_ms)).await;
        }
        let valid = client.probe_ticker(ticker).await?;
        if !valid {
            tracing::info!("provider does not recognize '{}'", ticker);
        }
        outcomes.push((ticker.clone(), valid));
    }

    match format {
        OutputFormat::Table => print_validations_table(&outcomes),
        OutputFormat::Json => print_validations_json(&outcomes),
        OutputFormat::Csv => print_validations_csv(&outcomes)?,
        OutputFormat::Markdown => print_validations_markdown(&outcomes),
        OutputFormat::Xml => print_validations_xml(&outcomes),
    }

    let invalid = outcomes.iter().filter(|(_, ok)| !ok).count();
    if invalid > 0 {
        bail!("{} of {} tickers failed validation", invalid, outcomes.len());
    }
    Ok(())
}
