//! Error types for the library layer.

use thiserror::Error;

/// Every way a [`crate::Fred`] call can fail. Nothing is retried or swallowed.
#[derive(Error, Debug)]
pub enum FredError {
    /// No API key could be resolved, or the configuration file is unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Caller input failed local checks. No request was sent.
    #[error("Invalid input: {0}")]
    Validation(String),
    /// FRED rejected the query. `message` is the server's text, verbatim.
    #[error("FRED error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },
    /// The response was well formed but held no matching records.
    #[error("{0}")]
    NotFound(String),
    /// A success response whose payload did not decode.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The network failed before FRED could answer.
    #[error("Network error: {0}")]
    Transport(String),
}

impl From<fred_api::Error> for FredError {
    fn from(e: fred_api::Error) -> Self {
        match e {
            fred_api::Error::Upstream {
                status, message, ..
            } => Self::Upstream { status, message },
            fred_api::Error::HttpStatus { status, body } => Self::Upstream {
                status,
                message: body,
            },
            fred_api::Error::Malformed(msg) => Self::MalformedResponse(msg),
            fred_api::Error::RequestFailed(msg) => Self::Transport(msg),
        }
    }
}
