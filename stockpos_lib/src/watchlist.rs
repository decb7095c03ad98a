//! Caller-owned watchlist state.
//!
//! The set of known tickers and the subset chosen for the current render
//! are plain values threaded through each compute cycle, not ambient
//! shared state. Both lists preserve insertion order and stay free of
//! duplicates, so ranking ties resolve the way the user entered tickers.

use crate::error::StockPosError;
use crate::validation::{parse_ticker_list, TICKER_SEPARATOR};

/// Available tickers and the selection to compute over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    available: Vec<String>,
    selected: Vec<String>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ticker to the available set and selects it. Already-known
    /// tickers keep their original position.
    pub fn add(&mut self, ticker: &str) {
        if !self.available.iter().any(|t| t == ticker) {
            self.available.push(ticker.to_string());
        }
        if !self.selected.iter().any(|t| t == ticker) {
            self.selected.push(ticker.to_string());
        }
    }

    /// Adds every ticker in order.
    pub fn add_all<'a>(&mut self, tickers: impl IntoIterator<Item = &'a str>) {
        for ticker in tickers {
            self.add(ticker);
        }
    }

    /// Re-selects an available ticker. Unknown tickers are ignored.
    pub fn select(&mut self, ticker: &str) {
        if self.available.iter().any(|t| t == ticker) && !self.selected.iter().any(|t| t == ticker)
        {
            self.selected.push(ticker.to_string());
        }
    }

    /// Removes a ticker from the selection, keeping it available.
    pub fn deselect(&mut self, ticker: &str) {
        self.selected.retain(|t| t != ticker);
    }

    /// Empties both lists.
    pub fn clear(&mut self) {
        self.available.clear();
        self.selected.clear();
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Renders the selection as a shareable `;`-joined string.
    pub fn to_share_string(&self) -> String {
        self.selected.join(&TICKER_SEPARATOR.to_string())
    }

    /// Rebuilds a watchlist from a share string, normalizing each entry.
    pub fn from_share_string(input: &str) -> Result<Self, StockPosError> {
        let mut watchlist = Self::new();
        for ticker in parse_ticker_list(input)? {
            watchlist.add(&ticker);
        }
        Ok(watchlist)
    }
}
