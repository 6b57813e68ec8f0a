//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (network error, timeout, bad URL).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// FRED rejected the request and explained why in an `<error>` element.
    #[error("FRED rejected the request (HTTP {status}): {message}")]
    Upstream {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The API returned a non-success status without a readable error element.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// A success response whose payload did not decode.
    #[error("Malformed response: {0}")]
    Malformed(String),
}
