//! Transit data API client.
//!
//! This module provides an HTTP client for the HAFAS-backed `transport.rest`
//! API (`v6.db.transport.rest` by default), which is the only data source.
//!
//! Key characteristics of the API:
//! - No API key, but rate limited; any request may fail or time out
//! - Station search answers with an object keyed by station id, best match first
//! - Departures boards reference trips by an opaque `tripId` containing `|`
//! - Trip details carry the full stopover sequence only when asked for

mod client;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{DEFAULT_BASE_URL, TransitClient, TransitConfig};
pub use error::TransitError;
pub use mock::MockTransitClient;
pub use provider::{DEPARTURE_RESULTS, DepartureQuery, TransitProvider};
pub use types::{
    DepartureDto, DeparturesResponse, LineDto, StationDto, StationSearchResponse, StopDto,
    StopoverDto, TripDto, TripResponse,
};
