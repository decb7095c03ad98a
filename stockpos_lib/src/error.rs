//! Error types for the library layer.

use std::fmt;

use crate::analytics::AnalyticsError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding analytics and input validation failures.
#[derive(Debug)]
pub enum StockPosError {
    /// An error from the underlying chart API client.
    Api(stockpos_api::Error),
    /// Summary computation failed (empty series, non-finite percentage).
    Analytics(AnalyticsError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for StockPosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Analytics(e) => write!(f, "Analytics error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for StockPosError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Analytics(e) => Some(e),
            _ => None,
        }
    }
}

impl From<stockpos_api::Error> for StockPosError {
    fn from(e: stockpos_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<AnalyticsError> for StockPosError {
    fn from(e: AnalyticsError) -> Self {
        Self::Analytics(e)
    }
}
