//! The seam between the connection finder and the transit API.

use std::future::Future;

use crate::domain::{DepartureTime, Product};

use super::error::TransitError;
use super::types::{DepartureDto, StationSearchResponse, TripDto};

/// Upper bound on departures requested from the board.
pub const DEPARTURE_RESULTS: u32 = 200;

/// Parameters for a departures board request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureQuery {
    /// Look-ahead window in minutes.
    pub duration_mins: u32,

    /// Maximum number of departures to return.
    pub results: u32,

    /// Start of the window; `None` means "now" as the upstream sees it.
    pub when: Option<DepartureTime>,
}

impl DepartureQuery {
    /// A regional-only board query for the given window.
    pub fn new(duration_mins: u32, when: Option<DepartureTime>) -> Self {
        Self {
            duration_mins,
            results: DEPARTURE_RESULTS,
            when,
        }
    }

    /// Query string pairs, including the product pre-filter flags.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("duration", self.duration_mins.to_string()),
            ("results", self.results.to_string()),
        ];

        for product in Product::REGIONAL {
            pairs.push((product.upstream_name(), "true".to_string()));
        }
        for product in Product::EXCLUDED {
            pairs.push((product.upstream_name(), "false".to_string()));
        }

        if let Some(when) = &self.when {
            pairs.push(("when", when.to_query_value()));
        }

        pairs
    }
}

/// Trait for the transit data capabilities the finder needs.
///
/// This abstraction allows the finder to be tested with mock data.
pub trait TransitProvider: Send + Sync {
    /// Fuzzy station search, asking for a single best match.
    fn search_stations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<StationSearchResponse, TransitError>> + Send;

    /// Departures board for a station.
    fn departures(
        &self,
        station_id: &str,
        query: &DepartureQuery,
    ) -> impl Future<Output = Result<Vec<DepartureDto>, TransitError>> + Send;

    /// A trip with its stopovers.
    fn trip(&self, trip_id: &str) -> impl Future<Output = Result<TripDto, TransitError>> + Send;
}
