//! Application state for the web layer.

use std::sync::Arc;

use crate::transit::TransitProvider;

/// Shared application state.
///
/// Holds the transit provider every request searches against. Nothing
/// request-specific lives here.
pub struct AppState<P> {
    /// Upstream transit provider (live client or mock)
    pub transit: Arc<P>,
}

impl<P: TransitProvider> AppState<P> {
    /// Create a new app state.
    pub fn new(transit: P) -> Self {
        Self {
            transit: Arc::new(transit),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            transit: Arc::clone(&self.transit),
        }
    }
}
