//! Finder error types.

use crate::transit::TransitError;

/// Errors that end a longest-direct search.
///
/// Per-departure problems (unfetchable trip, bad timestamps) never surface
/// here; they only skip the departure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FinderError {
    /// Missing or invalid request parameter
    #[error("invalid request: {0}")]
    Validation(String),

    /// Station query matched nothing
    #[error("no station found for query '{query}'")]
    StationNotFound { query: String },

    /// A mandatory upstream request failed
    #[error("upstream error: {message}")]
    Upstream { status: Option<u16>, message: String },

    /// Nothing survived filtering
    #[error("no direct regional connections with a computable duration found from {station}")]
    NoConnections { station: String },
}

impl FinderError {
    /// Wrap a failed mandatory upstream call, folding in its status.
    pub fn upstream(context: &str, err: &TransitError) -> Self {
        let status = err.status();
        let message = match status {
            Some(status) => format!("{context} failed with upstream status {status}"),
            None if err.is_timeout() => format!("{context} timed out"),
            None if matches!(err, TransitError::Json { .. }) => {
                format!("{context} failed: undecodable upstream response")
            }
            None => format!("{context} failed: {err}"),
        };

        FinderError::Upstream { status, message }
    }
}
