//! Data transfer objects for web requests and responses.
//!
//! Successful searches answer with the domain [`Connection`] list directly;
//! its serialized form is the public JSON shape.
//!
//! [`Connection`]: crate::domain::Connection

use serde::{Deserialize, Serialize};

use crate::finder::{FinderError, LongestDirectRequest};

/// Query parameters of `GET /longest-direct`.
///
/// Everything arrives as text so that malformed numbers become a
/// validation error with a readable message instead of a query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct LongestDirectParams {
    /// Free-text origin station
    pub station: Option<String>,

    /// Maximum number of connections
    pub limit: Option<String>,

    /// Departures board look-ahead in minutes
    pub duration: Option<String>,

    /// Start of the departures window (RFC 3339)
    pub when: Option<String>,
}

impl LongestDirectParams {
    /// Parse and validate into a finder request.
    pub fn to_request(&self) -> Result<LongestDirectRequest, FinderError> {
        LongestDirectRequest::from_params(
            self.station.as_deref(),
            self.limit.as_deref(),
            self.duration.as_deref(),
            self.when.as_deref(),
        )
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable cause
    pub detail: String,
}
