//! User-input validation for tickers and date windows.
//!
//! Normalization happens here, before anything reaches the provider or
//! the analytics: raw user text is trimmed, uppercased, and checked
//! against the ticker charset, and date windows are sanity-checked.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::StockPosError;

pub const MAX_TICKER_LENGTH: usize = 12;

/// Separator accepted between tickers in free-text input.
pub const TICKER_SEPARATOR: char = ';';

fn ticker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Exchange-suffixed (ISP.MI), class (BRK-B), index (^GSPC), and
    // futures/FX (ES=F) symbols are all accepted.
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z0-9][A-Z0-9.\-^=]*$").expect("ticker regex compiles"))
}

/// Normalizes one raw ticker: trim, uppercase, charset and length checks.
pub fn normalize_ticker(input: &str) -> Result<String, StockPosError> {
    let ticker = input.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(StockPosError::InvalidInput(
            "ticker is empty after trimming".to_string(),
        ));
    }
    if ticker.len() > MAX_TICKER_LENGTH {
        return Err(StockPosError::InvalidInput(format!(
            "ticker '{}' exceeds maximum length of {} characters",
            ticker, MAX_TICKER_LENGTH
        )));
    }
    if !ticker_pattern().is_match(&ticker) {
        return Err(StockPosError::InvalidInput(format!(
            "ticker '{}' contains unsupported characters (allowed: A-Z, 0-9, '.', '-', '^', '=')",
            input.trim()
        )));
    }
    Ok(ticker)
}

/// Parses a `;`-separated ticker list, normalizing each entry and dropping
/// duplicates while preserving first-seen order.
pub fn parse_ticker_list(input: &str) -> Result<Vec<String>, StockPosError> {
    let mut tickers: Vec<String> = Vec::new();
    for piece in input.split(TICKER_SEPARATOR) {
        if piece.trim().is_empty() {
            continue;
        }
        let ticker = normalize_ticker(piece)?;
        if !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    if tickers.is_empty() {
        return Err(StockPosError::InvalidInput(
            "no tickers found in input".to_string(),
        ));
    }
    Ok(tickers)
}

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(input: &str) -> Result<NaiveDate, StockPosError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        StockPosError::InvalidInput(format!(
            "invalid date '{}', expected YYYY-MM-DD",
            input.trim()
        ))
    })
}

/// Checks that a requested window is well-formed: start on or before end,
/// and not starting in the future relative to `today`.
pub fn validate_window(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<(), StockPosError> {
    if start > end {
        return Err(StockPosError::InvalidInput(format!(
            "window start {} is after end {}",
            start, end
        )));
    }
    if start > today {
        return Err(StockPosError::InvalidInput(format!(
            "window start {} is in the future",
            start
        )));
    }
    Ok(())
}
