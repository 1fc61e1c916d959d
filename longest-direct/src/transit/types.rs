//! Transit API response DTOs.
//!
//! These types map directly to the JSON returned by the HAFAS-backed
//! `transport.rest` API. They use `Option` liberally because the API omits
//! fields, sends `null`, and occasionally numbers where strings are expected.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::debug;

/// Response from `GET /stations`: an object keyed by station id.
///
/// Entries are kept in document order, because the upstream puts its best
/// match first.
#[derive(Debug, Clone, Default)]
pub struct StationSearchResponse {
    pub entries: Vec<(String, StationDto)>,
}

impl StationSearchResponse {
    /// The best match, if any.
    pub fn first(&self) -> Option<&(String, StationDto)> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for StationSearchResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = StationSearchResponse;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping station ids to stations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(1));
                while let Some((id, station)) = map.next_entry::<String, StationDto>()? {
                    entries.push((id, station));
                }
                Ok(StationSearchResponse { entries })
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(StationSearchResponse::default())
            }
        }

        deserializer.deserialize_any(EntriesVisitor)
    }
}

/// A station from the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    pub name: Option<String>,
}

/// Response from `GET /stops/{id}/departures`.
///
/// Older API versions answer with a bare array, newer ones wrap it.
/// Entries stay raw until [`into_departures`](Self::into_departures), so one
/// malformed entry cannot take the rest of the board down with it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeparturesResponse {
    Bare(Vec<serde_json::Value>),
    Wrapped { departures: Vec<serde_json::Value> },
    Other(serde_json::Value),
}

impl DeparturesResponse {
    /// The decodable departures, in board order.
    ///
    /// Entries that do not decode are dropped. A body with an unexpected
    /// shape yields none.
    pub fn into_departures(self) -> Vec<DepartureDto> {
        let entries = match self {
            DeparturesResponse::Bare(entries) => entries,
            DeparturesResponse::Wrapped { departures } => departures,
            DeparturesResponse::Other(_) => return Vec::new(),
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(departure) => Some(departure),
                Err(e) => {
                    debug!(index, error = %e, "skipping undecodable departure");
                    None
                }
            })
            .collect()
    }
}

/// One entry on a departures board.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    /// Trip identifier, usable with `GET /trips/{id}`.
    pub trip_id: Option<String>,

    /// Headsign shown on the train.
    pub direction: Option<String>,

    pub line: Option<LineDto>,

    /// Expected departure (realtime).
    pub when: Option<String>,

    /// Scheduled departure.
    pub planned_when: Option<String>,

    pub stop: Option<StopDto>,
}

/// Line metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    pub id: Option<String>,

    /// Display name, e.g. "RE 5".
    pub name: Option<String>,

    /// Short product name, e.g. "RE".
    pub product_name: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub fahrt_nr: Option<String>,

    /// Transport mode, e.g. "train".
    pub mode: Option<String>,

    /// Product, e.g. "regionalExpress".
    pub product: Option<String>,
}

impl LineDto {
    /// Whether the line carries no usable information at all.
    pub fn is_empty(&self) -> bool {
        [
            &self.id,
            &self.name,
            &self.product_name,
            &self.fahrt_nr,
            &self.mode,
            &self.product,
        ]
        .iter()
        .all(|field| field.as_deref().is_none_or(|s| s.trim().is_empty()))
    }
}

/// Response from `GET /trips/{id}`.
///
/// Newer API versions wrap the trip under `trip`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TripResponse {
    Wrapped { trip: TripDto },
    Bare(TripDto),
}

impl TripResponse {
    pub fn into_trip(self) -> TripDto {
        match self {
            TripResponse::Wrapped { trip } => trip,
            TripResponse::Bare(trip) => trip,
        }
    }
}

/// A trip with its stop sequence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDto {
    pub id: Option<String>,

    pub direction: Option<String>,

    pub line: Option<LineDto>,

    /// Stops in travel order. Only present when requested.
    pub stopovers: Option<Vec<StopoverDto>>,
}

impl TripDto {
    /// Stopovers, empty if the trip came without any.
    pub fn stopovers(&self) -> &[StopoverDto] {
        self.stopovers.as_deref().unwrap_or_default()
    }
}

/// One stop within a trip.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopoverDto {
    pub stop: Option<StopDto>,

    /// Expected arrival (realtime).
    pub arrival: Option<String>,

    pub planned_arrival: Option<String>,

    /// Expected departure (realtime).
    pub departure: Option<String>,

    pub planned_departure: Option<String>,
}

impl StopoverDto {
    /// The stop id, if known.
    pub fn stop_id(&self) -> Option<&str> {
        self.stop.as_ref().and_then(|s| s.id.as_deref())
    }

    /// The stop name, if known.
    pub fn stop_name(&self) -> Option<&str> {
        self.stop.as_ref().and_then(|s| s.name.as_deref())
    }
}

/// A stop or station reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    pub name: Option<String>,
}

/// Accept an identifier sent either as a string or as a bare number.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::String(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
