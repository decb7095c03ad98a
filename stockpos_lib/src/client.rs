//! Caching and pacing wrapper around the chart API client.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use rand::Rng;
use stockpos_api::types::{ChartData, OhlcBar};
use stockpos_api::{ChartQuery, Client};

use crate::cache::TtlCache;
use crate::error::StockPosError;

/// Trailing window used when probing whether the provider recognizes a ticker.
const PROBE_LOOKBACK_DAYS: u32 = 5;

/// Price history fetched for one ticker over one window.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    pub ticker: String,
    /// Provider-supplied company name, passed through untouched.
    pub display_name: Option<String>,
    pub bars: Vec<OhlcBar>,
}

/// Chart client wrapper that adds in-memory caching, request pacing, and
/// retry with exponential backoff.
///
/// Cache hits bypass the network entirely. On cache misses, a short
/// jittered delay is enforced between consecutive HTTP requests so a
/// multi-ticker fetch does not hammer the provider. The first request has
/// no delay.
pub struct CachedClient {
    inner: Client,
    cache: TtlCache<(String, String), PriceHistory>,
    /// Tracks when the last HTTP request was sent, for pacing.
    last_request: Mutex<Option<Instant>>,
}

struct RetryConfig {
    max_retries: usize,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryConfig {
    fn from_env() -> Self {
        Self {
            max_retries: env_usize("STOCKPOS_RETRY_MAX", 3),
            base_delay_ms: env_u64("STOCKPOS_RETRY_BASE_MS", 1000),
            max_delay_ms: env_u64("STOCKPOS_RETRY_MAX_MS", 15000),
        }
    }

    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

impl CachedClient {
    /// Creates a new cached client using the production chart API.
    pub fn new(history_ttl: Duration) -> Self {
        Self {
            inner: Client::new(),
            cache: TtlCache::new(history_ttl),
            last_request: Mutex::new(None),
        }
    }

    /// Creates a new cached client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, history_ttl: Duration) -> Self {
        Self {
            inner: Client::with_base_url(base_url),
            cache: TtlCache::new(history_ttl),
            last_request: Mutex::new(None),
        }
    }

    async fn pace(&self) {
        let sleep_dur = {
            let last = self.last_request.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(last_time) = *last {
                let elapsed = last_time.elapsed();
                let delay = Duration::from_millis(rand::thread_rng().gen_range(250..750));
                if elapsed < delay {
                    Some(delay - elapsed)
                } else {
                    None
                }
            } else {
                None
            }
        };
        if let Some(dur) = sleep_dur {
            tokio::time::sleep(dur).await;
        }
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, StockPosError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, StockPosError>>,
    {
        let cfg = RetryConfig::from_env();
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > cfg.max_retries || !is_retryable(&err) {
                        return Err(err);
                    }
                    let delay = cfg.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        cfg.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn get_chart_with_retry(
        &self,
        label: &str,
        query: &ChartQuery,
    ) -> Result<ChartData, StockPosError> {
        self.with_retry(label, || async {
            self.inner.get_chart(query).await.map_err(Into::into)
        })
        .await
    }

    /// Fetches daily history for `ticker` over the inclusive `[start, end]`
    /// window, consulting the cache first.
    ///
    /// An empty `bars` vector means the provider knows the symbol but has
    /// no tradable sessions in the window; callers must treat that as
    /// "unavailable" and never feed it to the analytics.
    pub async fn fetch_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceHistory, StockPosError> {
        let key = (ticker.to_string(), format!("{}..{}", start, end));
        if let Some(history) = self.cache.get(&key) {
            tracing::debug!("cache hit for {} {}..{}", ticker, start, end);
            return Ok(history);
        }

        self.pace().await;
        let query = ChartQuery::new(ticker).with_range(start, end);
        let chart = self.get_chart_with_retry("chart", &query).await?;

        let history = PriceHistory {
            ticker: ticker.to_string(),
            display_name: chart.display_name(),
            bars: chart.bars(),
        };
        self.cache.insert(key, history.clone());
        Ok(history)
    }

    /// Asks the provider whether it recognizes `ticker`, using a short
    /// trailing window. Unknown symbols and symbols without recent data
    /// yield `Ok(false)`; transport failures are errors.
    pub async fn probe_ticker(&self, ticker: &str) -> Result<bool, StockPosError> {
        self.pace().await;
        let query = ChartQuery::new(ticker).with_lookback_days(PROBE_LOOKBACK_DAYS);
        let outcome = self.get_chart_with_retry("probe", &query).await;
        match outcome {
            Ok(chart) => Ok(!chart.bars().is_empty()),
            Err(StockPosError::Api(
                stockpos_api::Error::SymbolNotFound(_)
                | stockpos_api::Error::Api { .. }
                | stockpos_api::Error::NoData,
            )) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Number of cached history entries.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

fn is_retryable(err: &StockPosError) -> bool {
    match err {
        StockPosError::Api(stockpos_api::Error::RequestFailed) => true,
        StockPosError::Api(stockpos_api::Error::HttpStatus { status, .. }) => {
            *status == 429 || *status >= 500
        }
        _ => false,
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
