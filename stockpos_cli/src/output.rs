use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use stockpos_lib::analytics::quote_url;
use stockpos_lib::types::OhlcBar;
use stockpos_lib::TickerSummary;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::xml_output;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

#[derive(Tabled, Serialize)]
struct SummaryRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Quote")]
    #[serde(rename = "Quote")]
    quote: String,
    #[tabled(rename = "Min")]
    #[serde(rename = "Min")]
    min: String,
    #[tabled(rename = "Current")]
    #[serde(rename = "Current")]
    current: String,
    #[tabled(rename = "Max")]
    #[serde(rename = "Max")]
    max: String,
}

#[derive(Tabled, Serialize)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Open")]
    #[serde(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    #[serde(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    #[serde(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    #[serde(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
}

#[derive(Tabled, Serialize)]
pub(crate) struct ValidationRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    pub(crate) ticker: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    pub(crate) status: String,
}

// -- Row builders --

fn build_summary_rows(summaries: &[TickerSummary]) -> Vec<SummaryRow> {
    summaries
        .iter()
        .map(|s| SummaryRow {
            ticker: s.ticker.clone(),
            name: s.display_name.clone().unwrap_or_default(),
            quote: quote_url(&s.ticker),
            min: format_extreme(s.min_value, s.min_date),
            current: format_price(s.current_value),
            max: format_extreme(s.max_value, s.max_date),
        })
        .collect()
}

fn build_history_rows(bars: &[OhlcBar]) -> Vec<HistoryRow> {
    bars.iter()
        .map(|b| HistoryRow {
            date: b.date.to_string(),
            open: format_price(b.open),
            high: format_price(b.high),
            low: format_price(b.low),
            close: format_price(b.close),
            volume: b.volume.map(|v| v.to_string()).unwrap_or_default(),
        })
        .collect()
}

fn build_validation_rows(outcomes: &[(String, bool)]) -> Vec<ValidationRow> {
    outcomes
        .iter()
        .map(|(ticker, ok)| ValidationRow {
            ticker: ticker.clone(),
            status: if *ok { "valid" } else { "invalid" }.to_string(),
        })
        .collect()
}

// -- Table output --

pub fn print_summaries_table(summaries: &[TickerSummary]) {
    println!("{}", Table::new(build_summary_rows(summaries)));
}

pub fn print_history_table(bars: &[OhlcBar]) {
    println!("{}", Table::new(build_history_rows(bars)));
}

pub fn print_validations_table(outcomes: &[(String, bool)]) {
    println!("{}", Table::new(build_validation_rows(outcomes)));
}

// -- Markdown output --

pub fn print_summaries_markdown(summaries: &[TickerSummary]) {
    let mut table = Table::new(build_summary_rows(summaries));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_history_markdown(bars: &[OhlcBar]) {
    let mut table = Table::new(build_history_rows(bars));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_validations_markdown(outcomes: &[(String, bool)]) {
    let mut table = Table::new(build_validation_rows(outcomes));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_summaries_csv(summaries: &[TickerSummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_summary_rows(summaries) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_history_csv(bars: &[OhlcBar]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_history_rows(bars) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_validations_csv(outcomes: &[(String, bool)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_validation_rows(outcomes) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- XML output --

pub fn print_summaries_xml(summaries: &[TickerSummary]) {
    println!("{}", xml_output::summaries_to_xml(summaries));
}

pub fn print_history_xml(bars: &[OhlcBar]) {
    println!("{}", xml_output::history_to_xml(bars));
}

pub fn print_validations_xml(outcomes: &[(String, bool)]) {
    println!(
        "{}",
        xml_output::validations_to_xml(&build_validation_rows(outcomes))
    );
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

pub fn print_validations_json(outcomes: &[(String, bool)]) {
    print_json(&build_validation_rows(outcomes));
}

fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

/// Extreme value with the day it occurred on, e.g. `196.45 (07/04/2025)`.
fn format_extreme(value: f64, date: NaiveDate) -> String {
    format!("{} ({})", format_price(value), date.format("%d/%m/%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> TickerSummary {
        TickerSummary {
            ticker: "AAPL".to_string(),
            display_name: Some("Apple Inc.".to_string()),
            min_value: 164.08,
            min_date: NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(),
            max_value: 237.49,
            max_date: NaiveDate::from_ymd_opt(2024, 12, 26).unwrap(),
            current_value: 213.25,
            pct_from_min: 164.08 / 213.25 - 1.0,
            pct_from_max: 1.0 - 213.25 / 237.49,
            spread: 0.3327,
        }
    }

    #[test]
    fn summary_row_formats_extremes_with_dates() {
        let rows = build_summary_rows(&[sample_summary()]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "AAPL");
        assert_eq!(rows[0].name, "Apple Inc.");
        assert_eq!(rows[0].quote, "https://finance.yahoo.com/quote/AAPL");
        assert_eq!(rows[0].min, "164.08 (07/04/2025)");
        assert_eq!(rows[0].current, "213.25");
        assert_eq!(rows[0].max, "237.49 (26/12/2024)");
    }

    #[test]
    fn summary_row_tolerates_missing_name() {
        let mut summary = sample_summary();
        summary.display_name = None;
        let rows = build_summary_rows(&[summary]);
        assert_eq!(rows[0].name, "");
    }

    #[test]
    fn history_row_formats_prices() {
        let bars = vec![OhlcBar {
            date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            open: 207.37,
            high: 220.2,
            low: 206.9,
            close: 213.07,
            volume: Some(198134300),
        }];
        let rows = build_history_rows(&bars);
        assert_eq!(rows[0].date, "2024-06-12");
        assert_eq!(rows[0].high, "220.20");
        assert_eq!(rows[0].volume, "198134300");
    }

    #[test]
    fn validation_rows_label_outcomes() {
        let rows =
            build_validation_rows(&[("AAPL".to_string(), true), ("NOSUCH".to_string(), false)]);
        assert_eq!(rows[0].status, "valid");
        assert_eq!(rows[1].status, "invalid");
    }

    #[test]
    fn format_price_two_decimals() {
        assert_eq!(format_price(1234.5), "1234.50");
        assert_eq!(format_price(0.125), "0.12");
    }
}
