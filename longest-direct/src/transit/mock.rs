//! Mock transit client for testing without API access.
//!
//! Serves stations, departure boards and trips from memory, either built up
//! in code or loaded from a fixture directory. Every call is counted, so
//! tests can assert which upstream requests were (not) made.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::de::DeserializeOwned;

use super::error::TransitError;
use super::provider::{DepartureQuery, TransitProvider};
use super::types::{
    DepartureDto, DeparturesResponse, StationDto, StationSearchResponse, TripDto, TripResponse,
};

/// Number of calls received per capability.
#[derive(Debug, Default)]
struct CallCounts {
    search: AtomicUsize,
    departures: AtomicUsize,
    trips: AtomicUsize,
}

/// Mock transit client serving canned data.
///
/// Unknown station queries answer with an empty search result, unknown
/// stations with an empty board, and unknown trips with a 404.
#[derive(Debug, Clone, Default)]
pub struct MockTransitClient {
    stations: Vec<(String, StationDto)>,
    departures: HashMap<String, Vec<DepartureDto>>,
    trips: HashMap<String, TripDto>,
    departures_status: Option<u16>,
    search_status: Option<u16>,
    calls: Arc<CallCounts>,
}

impl MockTransitClient {
    /// An empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from a directory.
    ///
    /// Expects `stations.json` (a station search response),
    /// `departures/{station id}.json` (a departures response) and
    /// `trips/*.json` (trip responses; indexed by the trip's own `id`).
    /// Only `stations.json` is required.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, TransitError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let stations: StationSearchResponse = read_json(&data_dir.join("stations.json"))?;
        mock.stations = stations.entries;

        for path in json_files(&data_dir.join("departures"))? {
            let station_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| fixture_error(format!("Invalid filename: {:?}", path)))?
                .to_string();
            let board: DeparturesResponse = read_json(&path)?;
            mock.departures.insert(station_id, board.into_departures());
        }

        for path in json_files(&data_dir.join("trips"))? {
            let trip: TripResponse = read_json(&path)?;
            let trip = trip.into_trip();
            let id = trip
                .id
                .clone()
                .ok_or_else(|| fixture_error(format!("Trip without id in {:?}", path)))?;
            mock.trips.insert(id, trip);
        }

        Ok(mock)
    }

    /// Add a station search result. The first one added is the best match.
    pub fn with_station(mut self, id: &str, name: Option<&str>) -> Self {
        self.stations.push((
            id.to_string(),
            StationDto {
                id: Some(id.to_string()),
                name: name.map(String::from),
            },
        ));
        self
    }

    /// Set the departures board of a station.
    pub fn with_departures(mut self, station_id: &str, departures: Vec<DepartureDto>) -> Self {
        self.departures.insert(station_id.to_string(), departures);
        self
    }

    /// Add a trip, keyed by the given id.
    pub fn with_trip(mut self, trip_id: &str, trip: TripDto) -> Self {
        self.trips.insert(trip_id.to_string(), trip);
        self
    }

    /// Make every departures request fail with the given status.
    pub fn with_departures_status(mut self, status: u16) -> Self {
        self.departures_status = Some(status);
        self
    }

    /// Make every station search fail with the given status.
    pub fn with_search_status(mut self, status: u16) -> Self {
        self.search_status = Some(status);
        self
    }

    /// Station searches received so far.
    pub fn search_calls(&self) -> usize {
        self.calls.search.load(Ordering::SeqCst)
    }

    /// Departures requests received so far.
    pub fn departures_calls(&self) -> usize {
        self.calls.departures.load(Ordering::SeqCst)
    }

    /// Trip requests received so far.
    pub fn trip_calls(&self) -> usize {
        self.calls.trips.load(Ordering::SeqCst)
    }

    /// Total upstream calls received so far.
    pub fn total_calls(&self) -> usize {
        self.search_calls() + self.departures_calls() + self.trip_calls()
    }
}

impl TransitProvider for MockTransitClient {
    async fn search_stations(&self, query: &str) -> Result<StationSearchResponse, TransitError> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.search_status {
            return Err(TransitError::Api {
                status,
                message: format!("mock failure for query {query:?}"),
            });
        }

        let needle = query.trim().to_lowercase();
        let entries = self
            .stations
            .iter()
            .filter(|(id, station)| {
                id.to_lowercase().contains(&needle)
                    || station
                        .name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .take(1)
            .cloned()
            .collect();

        Ok(StationSearchResponse { entries })
    }

    async fn departures(
        &self,
        station_id: &str,
        query: &DepartureQuery,
    ) -> Result<Vec<DepartureDto>, TransitError> {
        self.calls.departures.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.departures_status {
            return Err(TransitError::Api {
                status,
                message: format!("mock failure for station {station_id}"),
            });
        }

        let board = self.departures.get(station_id).cloned().unwrap_or_default();
        Ok(board.into_iter().take(query.results as usize).collect())
    }

    async fn trip(&self, trip_id: &str) -> Result<TripDto, TransitError> {
        self.calls.trips.fetch_add(1, Ordering::SeqCst);

        self.trips.get(trip_id).cloned().ok_or_else(|| TransitError::Api {
            status: 404,
            message: format!("no mock trip {trip_id}"),
        })
    }
}

fn fixture_error(message: String) -> TransitError {
    TransitError::Fixture(message)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TransitError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| fixture_error(format!("Failed to read {:?}: {}", path, e)))?;

    serde_json::from_str(&json).map_err(|e| TransitError::Json {
        message: format!("Failed to parse {:?}: {}", path, e),
        body: None,
    })
}

/// JSON files in a directory, sorted by name. A missing directory is empty.
fn json_files(dir: &Path) -> Result<Vec<std::path::PathBuf>, TransitError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| fixture_error(format!("Failed to read {:?}: {}", dir, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| fixture_error(format!("Failed to read directory entry: {}", e)))?
            .path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}
