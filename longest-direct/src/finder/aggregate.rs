//! Connection aggregation.
//!
//! Turns departures and their trips into at most one connection per
//! (line, direction, terminus), keeping the longest. A departure that cannot
//! produce a valid connection is skipped with a [`SkipReason`]; nothing here
//! aborts the search except finding nothing at all.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::{
    Accessor, Connection, ConnectionKey, Product, Station, Timestamp, first_present,
    first_present_or,
};
use crate::transit::{DepartureDto, LineDto, StopoverDto, TripDto};

use super::error::FinderError;
use super::rank::rank_connections;

/// Hard cap on departures examined per search.
pub const MAX_DEPARTURES_EXAMINED: usize = 80;

/// Line name used when the upstream gives none.
pub const UNKNOWN_LINE: &str = "Unbekannt";

/// Terminus name used when the upstream gives none.
pub const UNKNOWN_STOP: &str = "Unbekannt";

/// Product used when neither product nor mode is given.
const DEFAULT_PRODUCT: &str = "regional";

fn line_name(line: &LineDto) -> Option<&str> {
    line.name.as_deref()
}

fn line_product(line: &LineDto) -> Option<&str> {
    line.product.as_deref()
}

fn line_mode(line: &LineDto) -> Option<&str> {
    line.mode.as_deref()
}

fn actual_departure(stopover: &StopoverDto) -> Option<&str> {
    stopover.departure.as_deref()
}

fn planned_departure(stopover: &StopoverDto) -> Option<&str> {
    stopover.planned_departure.as_deref()
}

fn actual_arrival(stopover: &StopoverDto) -> Option<&str> {
    stopover.arrival.as_deref()
}

fn planned_arrival(stopover: &StopoverDto) -> Option<&str> {
    stopover.planned_arrival.as_deref()
}

const LINE_NAME: &[Accessor<LineDto>] = &[line_name];
const PRODUCT: &[Accessor<LineDto>] = &[line_product, line_mode];
const DEPARTURE_TIME: &[Accessor<StopoverDto>] = &[actual_departure, planned_departure];
const ARRIVAL_TIME: &[Accessor<StopoverDto>] = &[actual_arrival, planned_arrival];

/// Why a departure produced no connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("departure has no trip id")]
    NoTripId,

    #[error("departure has no line information")]
    NoLine,

    #[error("product {0} is not regional")]
    NotRegional(Product),

    #[error("trip could not be fetched")]
    TripUnavailable,

    #[error("trip has no stopovers")]
    NoStopovers,

    #[error("origin is not a stopover of the trip")]
    OriginNotOnTrip,

    #[error("origin is the last stopover")]
    OriginIsTerminus,

    #[error("terminus has no stop id")]
    TerminusUnknown,

    #[error("missing or unparsable {0} time")]
    BadTime(&'static str),

    #[error("non-positive duration of {0} minutes")]
    NonPositiveDuration(i64),
}

/// What an accepted connection did to the result map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// First connection for its key.
    Inserted,
    /// Longer than the previous best for its key.
    Replaced,
    /// Not longer than the existing best; discarded.
    Kept,
}

/// The parts of a departure the aggregator needs, checked before its trip
/// is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub trip_id: String,
    pub line_name: String,
    pub product: Product,
    pub direction: String,
}

impl Candidate {
    /// Classify a departure, rejecting ones that cannot be used.
    pub fn from_departure(departure: &DepartureDto) -> Result<Self, SkipReason> {
        let trip_id = departure
            .trip_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(SkipReason::NoTripId)?;

        let line = departure
            .line
            .as_ref()
            .filter(|line| !line.is_empty())
            .ok_or(SkipReason::NoLine)?;

        let product = Product::resolve(first_present_or(line, PRODUCT, DEFAULT_PRODUCT));
        if !product.is_regional() {
            return Err(SkipReason::NotRegional(product));
        }

        Ok(Self {
            trip_id: trip_id.to_string(),
            line_name: first_present_or(line, LINE_NAME, UNKNOWN_LINE).to_string(),
            product,
            direction: departure.direction.clone().unwrap_or_default(),
        })
    }
}

/// Accumulates the best connection per route for one origin.
#[derive(Debug)]
pub struct ConnectionAggregator {
    origin: Station,
    best: HashMap<ConnectionKey, Connection>,
}

impl ConnectionAggregator {
    pub fn new(origin: Station) -> Self {
        Self {
            origin,
            best: HashMap::new(),
        }
    }

    pub fn origin(&self) -> &Station {
        &self.origin
    }

    /// Number of distinct routes found so far.
    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Offer a candidate and its trip (if it could be fetched).
    pub fn offer(
        &mut self,
        candidate: &Candidate,
        trip: Option<&TripDto>,
    ) -> Result<Upsert, SkipReason> {
        let trip = trip.ok_or(SkipReason::TripUnavailable)?;
        let connection = self.build(candidate, trip)?;
        Ok(self.upsert(connection))
    }

    /// Build the connection from the origin to the trip's last stopover.
    fn build(&self, candidate: &Candidate, trip: &TripDto) -> Result<Connection, SkipReason> {
        let stopovers = trip.stopovers();
        let (terminus, _) = stopovers.split_last().ok_or(SkipReason::NoStopovers)?;

        let origin_index = stopovers
            .iter()
            .position(|s| s.stop_id().is_some_and(|id| self.origin.matches_id(id)))
            .ok_or(SkipReason::OriginNotOnTrip)?;

        if origin_index >= stopovers.len() - 1 {
            return Err(SkipReason::OriginIsTerminus);
        }

        let origin_stop = &stopovers[origin_index];

        let to_station = Station::new(
            terminus.stop_id().unwrap_or_default(),
            terminus
                .stop_name()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(UNKNOWN_STOP),
        )
        .map_err(|_| SkipReason::TerminusUnknown)?;

        let departure = first_present(origin_stop, DEPARTURE_TIME)
            .and_then(|s| Timestamp::parse(s).ok())
            .ok_or(SkipReason::BadTime("departure"))?;
        let arrival = first_present(terminus, ARRIVAL_TIME)
            .and_then(|s| Timestamp::parse(s).ok())
            .ok_or(SkipReason::BadTime("arrival"))?;

        let duration_minutes = departure.whole_minutes_until(&arrival);
        if duration_minutes <= 0 {
            return Err(SkipReason::NonPositiveDuration(duration_minutes));
        }

        Ok(Connection {
            line_name: candidate.line_name.clone(),
            product: candidate.product,
            direction: candidate.direction.clone(),
            from_station: self.origin.clone(),
            to_station,
            departure,
            arrival,
            duration_minutes,
            stops_after_origin: stopovers.len() - origin_index - 1,
            trip_id: candidate.trip_id.clone(),
        })
    }

    /// Keep `connection` if it is the longest for its key so far.
    pub fn upsert(&mut self, connection: Connection) -> Upsert {
        match self.best.entry(connection.key()) {
            Entry::Vacant(slot) => {
                slot.insert(connection);
                Upsert::Inserted
            }
            Entry::Occupied(mut slot) => {
                if connection.is_longer_than(slot.get()) {
                    slot.insert(connection);
                    Upsert::Replaced
                } else {
                    Upsert::Kept
                }
            }
        }
    }

    /// Rank the surviving connections and keep the first `limit`.
    pub fn into_ranked(self, limit: usize) -> Result<Vec<Connection>, FinderError> {
        if self.best.is_empty() {
            return Err(FinderError::NoConnections {
                station: self.origin.name().to_string(),
            });
        }

        Ok(rank_connections(self.best.into_values().collect(), limit))
    }
}
