//! Direct connections, the output of the aggregator.

use serde::Serialize;

use super::{Product, Station, Timestamp};

/// Identity of "the same route" across departures: line, direction and
/// terminus. At most one connection per key survives aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionKey {
    pub line_name: String,
    pub direction: String,
    pub to_station_id: String,
}

/// A single no-transfer trip segment from the origin to a trip's terminus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub line_name: String,
    pub product: Product,
    pub direction: String,
    pub from_station: Station,
    pub to_station: Station,
    pub departure: Timestamp,
    pub arrival: Timestamp,
    pub duration_minutes: i64,
    pub stops_after_origin: usize,
    pub trip_id: String,
}

impl Connection {
    /// The deduplication key of this connection.
    pub fn key(&self) -> ConnectionKey {
        ConnectionKey {
            line_name: self.line_name.clone(),
            direction: self.direction.clone(),
            to_station_id: self.to_station.id().to_string(),
        }
    }

    /// Whether this connection should replace `existing` for the same key.
    ///
    /// Only a strictly longer duration wins, so the first of several equally
    /// long departures is kept.
    pub fn is_longer_than(&self, existing: &Connection) -> bool {
        self.duration_minutes > existing.duration_minutes
    }
}
