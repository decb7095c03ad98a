//! HTTP client for the Yahoo Finance chart API.

use std::time::Duration;

use url::Url;

use crate::{
    query::ChartQuery,
    types::{ChartData, ChartResponse},
    user_agent::get_user_agent,
    Error,
};

/// HTTP client for the chart endpoint.
///
/// Sends requests with browser-like headers and a randomized user agent to
/// avoid being blocked. Each request builds a fresh `reqwest::Client` with
/// a 30-second timeout.
pub struct Client {
    /// Base URL for the API. Defaults to `https://query1.finance.yahoo.com`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production chart API.
    pub fn new() -> Self {
        Self {
            base_api_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.to_string(),
        }
    }

    fn get_url(&self, query: &ChartQuery) -> Result<Url, Error> {
        let url = Url::parse(
            format!("{}/v8/finance/chart/{}", &self.base_api_url, query.symbol).as_str(),
        )
        .map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(query.add_to_url(&url))
    }

    /// Fetches one chart result for the queried symbol and window.
    pub async fn get_chart(&self, query: &ChartQuery) -> Result<ChartData, Error> {
        let url = self.get_url(query)?;
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "en-US,en;q=0.9")
            .header("origin", "https://finance.yahoo.com")
            .header(
                "referer",
                format!("https://finance.yahoo.com/quote/{}", query.symbol),
            )
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get chart: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        // Unknown symbols come back as 404 with an error envelope in the body.
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::SymbolNotFound(query.symbol.clone()));
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<ChartResponse>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse chart response: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        let envelope = parsed.chart;
        if let Some(failure) = envelope.error {
            return Err(Error::Api {
                code: failure.code,
                description: failure.description,
            });
        }

        envelope
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or(Error::NoData)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
