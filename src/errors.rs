//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The base URL supplied at construction is not an absolute http(s) URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// The HTTP transport failed (connection error, timeout, or DNS failure).
    #[error("Request failed")]
    Transport(#[from] reqwest::Error),
    /// The API returned a non-200 status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not valid JSON or did not match the expected shape.
    #[error("Failed to parse response body")]
    Decode(#[source] serde_json::Error),
    /// The photo has no file under the requested rendition name.
    #[error("Unknown rendition: {0}")]
    UnknownRendition(String),
    /// The operation was stopped through its cancel token.
    #[error("Operation cancelled")]
    Cancelled,
}
