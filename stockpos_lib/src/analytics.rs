//! Percentage-distance analytics over fetched price history.
//!
//! Pure functions: one summary per ticker from its daily OHLC series, and
//! a spread-ranked ordering over several summaries. No network calls, no
//! shared state; safe to call from multiple threads on independent input.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;
use stockpos_api::types::OhlcBar;
use thiserror::Error;

/// Errors from summary computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// The price series has no observations. Callers are expected to have
    /// filtered empty fetch results out before summarizing.
    #[error("price series for '{0}' is empty")]
    EmptySeries(String),
    /// A percentage could not be computed as a finite number (zero close
    /// or zero period maximum).
    #[error("non-finite percentage for '{0}'")]
    NonFinite(String),
}

/// Derived statistics for one ticker over one date window.
///
/// `min_value` is taken over daily lows, `max_value` over daily highs, and
/// `current_value` from the last close. The three come from different
/// fields, so `min_value <= current_value <= max_value` need not hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerSummary {
    pub ticker: String,
    pub display_name: Option<String>,
    pub min_value: f64,
    pub min_date: NaiveDate,
    pub max_value: f64,
    pub max_date: NaiveDate,
    pub current_value: f64,
    /// `(min_value / current_value) - 1`, as a fraction. At most zero when
    /// the close sits above the period low.
    pub pct_from_min: f64,
    /// `1 - (current_value / max_value)`, as a fraction. At least zero when
    /// the close sits below the period high.
    pub pct_from_max: f64,
    /// `|pct_from_min - pct_from_max|`, the ranking key.
    pub spread: f64,
}

/// Computes the summary record for one ticker.
///
/// `bars` must be in chronological order; the last element supplies the
/// current value. Min and max dates are the first occurrence on ties.
/// A zero close or zero period maximum is rejected as
/// [`AnalyticsError::NonFinite`] rather than propagated as infinity, so
/// that every spread handed to [`rank`] is finite and totally ordered.
pub fn summarize(
    ticker: &str,
    display_name: Option<String>,
    bars: &[OhlcBar],
) -> Result<TickerSummary, AnalyticsError> {
    let Some(first) = bars.first() else {
        return Err(AnalyticsError::EmptySeries(ticker.to_string()));
    };

    let mut min_value = first.low;
    let mut min_date = first.date;
    let mut max_value = first.high;
    let mut max_date = first.date;
    for bar in &bars[1..] {
        if bar.low < min_value {
            min_value = bar.low;
            min_date = bar.date;
        }
        if bar.high > max_value {
            max_value = bar.high;
            max_date = bar.date;
        }
    }
    let current_value = bars[bars.len() - 1].close;

    let pct_from_min = min_value / current_value - 1.0;
    let pct_from_max = 1.0 - current_value / max_value;
    if !pct_from_min.is_finite() || !pct_from_max.is_finite() {
        return Err(AnalyticsError::NonFinite(ticker.to_string()));
    }

    Ok(TickerSummary {
        ticker: ticker.to_string(),
        display_name,
        min_value,
        min_date,
        max_value,
        max_date,
        current_value,
        pct_from_min,
        pct_from_max,
        spread: (pct_from_min - pct_from_max).abs(),
    })
}

/// Orders summaries by spread, widest first. The sort is stable, so
/// summaries with equal spreads keep their input order.
pub fn rank(mut summaries: Vec<TickerSummary>) -> Vec<TickerSummary> {
    summaries.sort_by(|a, b| b.spread.partial_cmp(&a.spread).unwrap_or(Ordering::Equal));
    summaries
}

/// Quote page URL for a ticker, rendered as the link column in summaries.
pub fn quote_url(ticker: &str) -> String {
    format!("https://finance.yahoo.com/quote/{}", ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, n).unwrap()
    }

    fn bar(date: NaiveDate, low: f64, high: f64, close: f64) -> OhlcBar {
        OhlcBar {
            date,
            open: close,
            high,
            low,
            close,
            volume: None,
        }
    }

    fn summary_with_spread(ticker: &str, spread: f64) -> TickerSummary {
        TickerSummary {
            ticker: ticker.to_string(),
            display_name: None,
            min_value: 1.0,
            min_date: day(1),
            max_value: 2.0,
            max_date: day(2),
            current_value: 1.5,
            pct_from_min: 0.0,
            pct_from_max: 0.0,
            spread,
        }
    }

    #[test]
    fn summarize_basic_series() {
        let bars = vec![
            bar(day(3), 10.0, 15.0, 12.0),
            bar(day(4), 8.0, 20.0, 14.0),
            bar(day(5), 12.0, 14.0, 11.0),
        ];
        let s = summarize("TEST", Some("Test Corp".to_string()), &bars).unwrap();

        assert_eq!(s.min_value, 8.0);
        assert_eq!(s.min_date, day(4));
        assert_eq!(s.max_value, 20.0);
        assert_eq!(s.max_date, day(4));
        assert_eq!(s.current_value, 11.0);
        assert!((s.pct_from_min - (8.0 / 11.0 - 1.0)).abs() < TOLERANCE);
        assert!((s.pct_from_max - 0.45).abs() < TOLERANCE);
        assert!((s.spread - (8.0_f64 / 11.0 - 1.0 - 0.45).abs()).abs() < TOLERANCE);
        assert_eq!(s.display_name.as_deref(), Some("Test Corp"));
    }

    #[test]
    fn close_at_period_high_has_zero_pct_from_max() {
        let bars = vec![bar(day(3), 10.0, 18.0, 15.0), bar(day(4), 14.0, 20.0, 20.0)];
        let s = summarize("TEST", None, &bars).unwrap();
        assert_eq!(s.pct_from_max, 0.0);
    }

    #[test]
    fn close_at_period_low_has_zero_pct_from_min() {
        let bars = vec![bar(day(3), 10.0, 18.0, 15.0), bar(day(4), 10.0, 16.0, 10.0)];
        let s = summarize("TEST", None, &bars).unwrap();
        assert_eq!(s.pct_from_min, 0.0);
    }

    #[test]
    fn min_and_max_keep_first_occurrence_on_ties() {
        let bars = vec![
            bar(day(3), 8.0, 20.0, 12.0),
            bar(day(4), 8.0, 20.0, 12.0),
            bar(day(5), 9.0, 19.0, 12.0),
        ];
        let s = summarize("TEST", None, &bars).unwrap();
        assert_eq!(s.min_date, day(3));
        assert_eq!(s.max_date, day(3));
    }

    #[test]
    fn single_bar_series() {
        let bars = vec![bar(day(3), 9.5, 10.5, 10.0)];
        let s = summarize("TEST", None, &bars).unwrap();
        assert_eq!(s.min_date, day(3));
        assert_eq!(s.max_date, day(3));
        assert_eq!(s.current_value, 10.0);
    }

    #[test]
    fn current_can_sit_outside_min_max() {
        // Low/high/close come from different fields; the last close may
        // fall below every daily low in the series.
        let bars = vec![bar(day(3), 10.0, 15.0, 12.0), bar(day(4), 11.0, 14.0, 9.0)];
        let s = summarize("TEST", None, &bars).unwrap();
        assert_eq!(s.min_value, 10.0);
        assert_eq!(s.current_value, 9.0);
        assert!(s.current_value < s.min_value);
        assert!(s.pct_from_min > 0.0);
    }

    #[test]
    fn empty_series_is_an_error() {
        let result = summarize("TEST", None, &[]);
        assert_eq!(result, Err(AnalyticsError::EmptySeries("TEST".to_string())));
    }

    #[test]
    fn zero_close_is_an_error() {
        let bars = vec![bar(day(3), 1.0, 2.0, 0.0)];
        let result = summarize("TEST", None, &bars);
        assert_eq!(result, Err(AnalyticsError::NonFinite("TEST".to_string())));
    }

    #[test]
    fn zero_max_is_an_error() {
        let bars = vec![bar(day(3), 0.0, 0.0, 1.0)];
        let result = summarize("TEST", None, &bars);
        assert_eq!(result, Err(AnalyticsError::NonFinite("TEST".to_string())));
    }

    #[test]
    fn rank_sorts_by_spread_descending() {
        let ranked = rank(vec![
            summary_with_spread("A", 0.10),
            summary_with_spread("B", 0.30),
        ]);
        assert_eq!(ranked[0].ticker, "B");
        assert_eq!(ranked[1].ticker, "A");
        for pair in ranked.windows(2) {
            assert!(pair[0].spread >= pair[1].spread);
        }
    }

    #[test]
    fn rank_is_stable_on_ties() {
        let ranked = rank(vec![
            summary_with_spread("FIRST", 0.2),
            summary_with_spread("SECOND", 0.2),
            summary_with_spread("THIRD", 0.5),
        ]);
        assert_eq!(ranked[0].ticker, "THIRD");
        assert_eq!(ranked[1].ticker, "FIRST");
        assert_eq!(ranked[2].ticker, "SECOND");
    }

    #[test]
    fn rank_is_idempotent() {
        let once = rank(vec![
            summary_with_spread("A", 0.1),
            summary_with_spread("B", 0.4),
            summary_with_spread("C", 0.2),
        ]);
        let twice = rank(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn rank_empty_is_empty() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn quote_url_embeds_ticker() {
        assert_eq!(
            quote_url("STLAM.MI"),
            "https://finance.yahoo.com/quote/STLAM.MI"
        );
    }
}
