//! Error types for the chart API client.

/// Errors that can occur when requesting chart data.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The provider returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The provider does not recognize the symbol (HTTP 404).
    #[error("Symbol '{0}' not found")]
    SymbolNotFound(String),
    /// The provider answered with an error object in the response body.
    #[error("Provider error {code}: {description}")]
    Api { code: String, description: String },
    /// The response parsed but carried no chart result.
    #[error("No chart data in response")]
    NoData,
}
