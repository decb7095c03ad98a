//! Library layer for stock positioning: cached chart client, input
//! validation, watchlist state, and percentage-distance analytics.
//!
//! Wraps the `stockpos_api` crate with an in-memory TTL cache, request
//! pacing, and retry, and computes the ranked min/max/current summaries
//! rendered by the CLI.

pub mod analytics;
pub mod cache;
pub mod client;
pub mod error;
pub mod presets;
pub mod validation;
pub mod watchlist;

pub use stockpos_api;
pub use stockpos_api::types;
pub use stockpos_api::{ChartQuery, ChartWindow, Interval};

pub use analytics::{rank, summarize, AnalyticsError, TickerSummary};
pub use client::{CachedClient, PriceHistory};
pub use error::StockPosError;
pub use presets::Preset;
pub use watchlist::Watchlist;
