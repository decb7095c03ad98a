//! Query builder for the chart endpoint.

use chrono::{NaiveDate, NaiveTime};
use url::Url;

/// Bar width requested from the provider. Daily is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interval {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    fn as_wire(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }
}

/// The date window requested from the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartWindow {
    /// Inclusive calendar range, sent as `period1`/`period2` Unix seconds.
    /// `period2` is the midnight after `end` so the last day is included.
    Between { start: NaiveDate, end: NaiveDate },
    /// Trailing N days, sent as the provider's relative `range=Nd` form.
    Lookback(u32),
}

/// Query parameters for `/v8/finance/chart/{symbol}`.
pub struct ChartQuery {
    pub symbol: String,
    pub window: ChartWindow,
    pub interval: Interval,
    /// Ask the provider to include dividend/split events in the response.
    pub include_events: bool,
}

impl ChartQuery {
    /// Creates a query for `symbol` over a trailing one-year window.
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            window: ChartWindow::Lookback(365),
            interval: Interval::default(),
            include_events: false,
        }
    }

    /// Sets an inclusive calendar date range.
    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.window = ChartWindow::Between { start, end };
        self
    }

    /// Sets a trailing window of N days from today.
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.window = ChartWindow::Lookback(days);
        self
    }

    /// Sets the requested bar width.
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Requests dividend/split events alongside the price arrays.
    pub fn with_events(mut self) -> Self {
        self.include_events = true;
        self
    }

    /// Appends this query's parameters to the given URL, returning the modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        match self.window {
            ChartWindow::Between { start, end } => {
                let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
                // Midnight after `end`, so the closing bar of `end` itself is returned.
                let end_excl = end.succ_opt().unwrap_or(end);
                let period2 = end_excl.and_time(NaiveTime::MIN).and_utc().timestamp();
                url.query_pairs_mut()
                    .append_pair("period1", &period1.to_string());
                url.query_pairs_mut()
                    .append_pair("period2", &period2.to_string());
            }
            ChartWindow::Lookback(days) => {
                url.query_pairs_mut()
                    .append_pair("range", format!("{}d", days).as_str());
            }
        }
        url.query_pairs_mut()
            .append_pair("interval", self.interval.as_wire());
        if self.include_events {
            url.query_pairs_mut().append_pair("events", "div,split");
        }
        url
    }
}
