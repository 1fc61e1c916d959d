//! Longest direct connection finder.
//!
//! This module answers: "from this station, which regional trains ride the
//! longest without a change, and where do they end?"
//!
//! It resolves the station, reads its regional departures board, follows
//! each departure's trip to its terminus and keeps the longest connection
//! per (line, direction, terminus).

mod aggregate;
mod error;
mod fetch;
mod rank;
mod request;
mod resolve;
mod search;

#[cfg(test)]
mod search_tests;

pub use aggregate::{
    Candidate, ConnectionAggregator, MAX_DEPARTURES_EXAMINED, SkipReason, UNKNOWN_LINE,
    UNKNOWN_STOP, Upsert,
};
pub use error::FinderError;
pub use fetch::{fetch_departures, fetch_trip, fetch_trips};
pub use rank::{compare_connections, rank_connections};
pub use request::{
    DEFAULT_DURATION_MINS, DEFAULT_LIMIT, DURATION_RANGE, LIMIT_RANGE, LongestDirectRequest,
};
pub use resolve::resolve_station;
pub use search::{ConnectionFinder, SearchResult, find_longest_direct};
