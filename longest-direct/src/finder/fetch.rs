//! Departure and trip fetching.
//!
//! The departures board is mandatory: failure ends the search. Trips are
//! best-effort: a trip that cannot be fetched only drops its departure.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{DepartureTime, Station};
use crate::transit::{DepartureDto, DepartureQuery, TransitProvider, TripDto};

use super::error::FinderError;

/// Fetch the regional departures board of `station`.
///
/// An empty board is not an error here.
pub async fn fetch_departures<P: TransitProvider>(
    provider: &P,
    station: &Station,
    duration_mins: u32,
    when: Option<DepartureTime>,
) -> Result<Vec<DepartureDto>, FinderError> {
    let query = DepartureQuery::new(duration_mins, when);

    let departures = provider
        .departures(station.id(), &query)
        .await
        .map_err(|e| {
            warn!(station = %station, error = %e, "departures board request failed");
            FinderError::upstream("departures board request", &e)
        })?;

    debug!(station = %station, count = departures.len(), "fetched departures");
    Ok(departures)
}

/// Fetch a trip with its stopovers, or `None` if it is unavailable.
pub async fn fetch_trip<P: TransitProvider>(provider: &P, trip_id: &str) -> Option<TripDto> {
    match provider.trip(trip_id).await {
        Ok(trip) => Some(trip),
        Err(e) => {
            debug!(trip_id, error = %e, "skipping unavailable trip");
            None
        }
    }
}

/// Fetch several trips concurrently. Results are in the order of `trip_ids`.
pub async fn fetch_trips<P, I, S>(provider: &P, trip_ids: I) -> Vec<Option<TripDto>>
where
    P: TransitProvider,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids: Vec<S> = trip_ids.into_iter().collect();
    join_all(ids.iter().map(|id| fetch_trip(provider, id.as_ref()))).await
}
