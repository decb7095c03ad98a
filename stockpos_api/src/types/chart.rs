use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Top-level response wrapper: `{ "chart": { "result": [...], "error": null } }`.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

/// The provider reports either a result array or an in-body error object,
/// regardless of HTTP status.
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartData>>,
    pub error: Option<ApiFailure>,
}

/// The provider's in-body error object.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFailure {
    pub code: String,
    pub description: String,
}

/// One chart result: instrument metadata plus parallel price arrays.
#[derive(Debug, Deserialize)]
pub struct ChartData {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

/// Instrument metadata attached to every chart result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub instrument_type: Option<String>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

/// Parallel per-session arrays. The provider emits `null` for sessions
/// where the instrument did not trade, so every slot is optional.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

/// One clean daily observation. Dates are calendar days and need not be
/// contiguous; weekends and market holidays are simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OhlcBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl ChartData {
    /// Human-readable instrument name: `longName`, falling back to `shortName`.
    pub fn display_name(&self) -> Option<String> {
        self.meta
            .long_name
            .clone()
            .or_else(|| self.meta.short_name.clone())
    }

    /// Flattens the parallel indicator arrays into clean daily bars.
    ///
    /// Timestamps are trading-session instants; only the UTC calendar date
    /// is kept. Rows where any price field is `null` are dropped.
    pub fn bars(&self) -> Vec<OhlcBar> {
        let Some(quote) = self.indicators.quote.first() else {
            return Vec::new();
        };
        let mut bars = Vec::with_capacity(self.timestamp.len());
        for (i, ts) in self.timestamp.iter().enumerate() {
            let Some(date) = DateTime::from_timestamp(*ts, 0).map(|dt| dt.date_naive()) else {
                continue;
            };
            let (Some(open), Some(high), Some(low), Some(close)) = (
                value_at(&quote.open, i),
                value_at(&quote.high, i),
                value_at(&quote.low, i),
                value_at(&quote.close, i),
            ) else {
                continue;
            };
            bars.push(OhlcBar {
                date,
                open,
                high,
                low,
                close,
                volume: quote.volume.get(i).copied().flatten(),
            });
        }
        bars
    }
}

fn value_at(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_with(timestamps: Vec<i64>, quote: QuoteBlock) -> ChartData {
        ChartData {
            meta: ChartMeta {
                symbol: "TEST".to_string(),
                currency: Some("USD".to_string()),
                exchange_name: None,
                instrument_type: None,
                long_name: Some("Test Corp".to_string()),
                short_name: Some("Test".to_string()),
                regular_market_price: None,
            },
            timestamp: timestamps,
            indicators: Indicators { quote: vec![quote] },
        }
    }

    #[test]
    fn bars_drop_null_rows() {
        // 2024-06-12 and 2024-06-14 session opens; the middle row is null.
        let chart = chart_with(
            vec![1718199000, 1718285400, 1718371800],
            QuoteBlock {
                open: vec![Some(10.0), None, Some(11.0)],
                high: vec![Some(12.0), None, Some(13.0)],
                low: vec![Some(9.0), None, Some(10.5)],
                close: vec![Some(11.0), None, Some(12.5)],
                volume: vec![Some(1000), None, Some(2000)],
            },
        );
        let bars = chart.bars();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert_eq!(bars[1].close, 12.5);
        assert_eq!(bars[1].volume, Some(2000));
    }

    #[test]
    fn bars_empty_without_quote_block() {
        let chart = ChartData {
            meta: ChartMeta {
                symbol: "TEST".to_string(),
                currency: None,
                exchange_name: None,
                instrument_type: None,
                long_name: None,
                short_name: None,
                regular_market_price: None,
            },
            timestamp: vec![1718199000],
            indicators: Indicators { quote: vec![] },
        };
        assert!(chart.bars().is_empty());
    }

    #[test]
    fn display_name_prefers_long_name() {
        let chart = chart_with(vec![], QuoteBlock::default());
        assert_eq!(chart.display_name().as_deref(), Some("Test Corp"));
    }
}
