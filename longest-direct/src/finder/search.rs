//! Longest direct connection search.
//!
//! Resolves the origin, reads its regional departures board, fetches the
//! trip behind each examined departure and keeps, per route, the longest
//! ride to the trip's terminus.

use tracing::{debug, info};

use crate::domain::{Connection, Station};
use crate::transit::TransitProvider;

use super::aggregate::{Candidate, ConnectionAggregator, MAX_DEPARTURES_EXAMINED};
use super::error::FinderError;
use super::fetch::{fetch_departures, fetch_trips};
use super::request::LongestDirectRequest;
use super::resolve::resolve_station;

/// Result of a longest-direct search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The resolved origin station.
    pub origin: Station,

    /// Connections, longest first.
    pub connections: Vec<Connection>,

    /// Departures taken from the board (at most [`MAX_DEPARTURES_EXAMINED`]).
    pub departures_examined: usize,

    /// Examined departures that produced no connection.
    pub skipped: usize,
}

/// Longest direct connection finder.
pub struct ConnectionFinder<'a, P> {
    provider: &'a P,
}

impl<'a, P: TransitProvider> ConnectionFinder<'a, P> {
    /// Create a finder on top of a transit provider.
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Run a search.
    ///
    /// Fails only for an invalid request, an unknown station, a failed
    /// station search or departures request, or when nothing usable is found.
    pub async fn find(&self, request: &LongestDirectRequest) -> Result<SearchResult, FinderError> {
        request.validate()?;

        let origin = resolve_station(self.provider, request.station_query()).await?;
        let departures =
            fetch_departures(self.provider, &origin, request.duration_mins, request.when).await?;
        let departures_examined = departures.len().min(MAX_DEPARTURES_EXAMINED);

        let mut skipped = 0;
        let candidates: Vec<Candidate> = departures
            .iter()
            .take(MAX_DEPARTURES_EXAMINED)
            .filter_map(|departure| match Candidate::from_departure(departure) {
                Ok(candidate) => Some(candidate),
                Err(reason) => {
                    debug!(trip_id = ?departure.trip_id, %reason, "skipping departure");
                    skipped += 1;
                    None
                }
            })
            .collect();

        let trips = fetch_trips(
            self.provider,
            candidates.iter().map(|c| c.trip_id.as_str()),
        )
        .await;

        // Upserts follow board order, not fetch completion order.
        let mut aggregator = ConnectionAggregator::new(origin.clone());
        for (candidate, trip) in candidates.iter().zip(&trips) {
            if let Err(reason) = aggregator.offer(candidate, trip.as_ref()) {
                debug!(trip_id = %candidate.trip_id, line = %candidate.line_name, %reason, "skipping departure");
                skipped += 1;
            }
        }

        let routes = aggregator.len();
        let connections = aggregator.into_ranked(request.limit)?;

        info!(
            origin = %origin,
            departures = departures_examined,
            skipped,
            routes,
            returned = connections.len(),
            "longest direct search complete"
        );

        Ok(SearchResult {
            origin,
            connections,
            departures_examined,
            skipped,
        })
    }
}

/// Find the longest direct regional connections for `request`.
pub async fn find_longest_direct<P: TransitProvider>(
    provider: &P,
    request: &LongestDirectRequest,
) -> Result<Vec<Connection>, FinderError> {
    ConnectionFinder::new(provider)
        .find(request)
        .await
        .map(|result| result.connections)
}
