//! Transit client error types.

use std::fmt;

/// Errors from the transit HTTP client.
#[derive(Debug)]
pub enum TransitError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Base URL cannot be used to build endpoint URLs
    InvalidUrl(String),

    /// The client's request limiter was shut down
    ClientClosed,

    /// Fixture data could not be read
    Fixture(String),
}

impl TransitError {
    /// Upstream HTTP status, when the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransitError::Http(e) => e.status().map(|s| s.as_u16()),
            TransitError::Api { status, .. } => Some(*status),
            TransitError::RateLimited => Some(429),
            TransitError::Json { .. }
            | TransitError::InvalidUrl(_)
            | TransitError::ClientClosed
            | TransitError::Fixture(_) => None,
        }
    }

    /// Whether the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransitError::Http(e) if e.is_timeout())
    }
}

impl fmt::Display for TransitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitError::Http(e) if e.is_timeout() => write!(f, "request timed out: {e}"),
            TransitError::Http(e) => write!(f, "HTTP error: {e}"),
            TransitError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TransitError::Api { status, message } if message.is_empty() => {
                write!(f, "API error {status}")
            }
            TransitError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            TransitError::RateLimited => write!(f, "rate limited by transit API"),
            TransitError::InvalidUrl(url) => write!(f, "invalid base URL: {url}"),
            TransitError::ClientClosed => write!(f, "transit client is shut down"),
            TransitError::Fixture(message) => write!(f, "fixture error: {message}"),
        }
    }
}

impl std::error::Error for TransitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransitError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransitError {
    fn from(err: reqwest::Error) -> Self {
        TransitError::Http(err)
    }
}
