//! Station resolution: free text to one station.

use tracing::{debug, warn};

use crate::domain::Station;
use crate::transit::TransitProvider;

use super::error::FinderError;

/// Resolve a free-text query to the upstream's best matching station.
///
/// Takes the first match without disambiguation. A match without a usable
/// name is displayed under the query itself.
pub async fn resolve_station<P: TransitProvider>(
    provider: &P,
    query: &str,
) -> Result<Station, FinderError> {
    let response = provider.search_stations(query).await.map_err(|e| {
        warn!(query, error = %e, "station search failed");
        FinderError::upstream("station search", &e)
    })?;

    let not_found = || FinderError::StationNotFound {
        query: query.to_string(),
    };

    let (key, dto) = response.first().ok_or_else(not_found)?;

    let id = if key.trim().is_empty() {
        dto.id.as_deref().unwrap_or_default()
    } else {
        key.as_str()
    };

    let name = dto
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(query);

    let station = Station::new(id, name).map_err(|_| not_found())?;
    debug!(query, station = %station, "resolved station");

    Ok(station)
}
