//! Index fetch error definitions.

use thiserror::Error;

/// Ways an index lookup can fail. Callers treat all of them as "no usable index".
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be built (bad URL, bad host header).
    #[error("Request setup failed: {0}")]
    RequestSetup(String),

    /// The request or the body transfer failed on the wire.
    #[error("Request error: {0}")]
    Connection(String),

    /// The body was not valid JSON.
    #[error("Failed to parse body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::RequestSetup(_) => "request_setup",
            FetchError::Connection(_) => "connection",
            FetchError::Parse(_) => "parse",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            FetchError::RequestSetup(e.to_string())
        } else {
            FetchError::Connection(e.to_string())
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
