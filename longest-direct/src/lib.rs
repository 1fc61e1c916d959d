//! Longest direct regional train connections.
//!
//! A web service that answers: "from this station, which regional trains
//! (RE, RB, S-Bahn) ride the longest without a change, and where to?"
//!
//! Data comes from the HAFAS-backed `transport.rest` API.

pub mod config;
pub mod domain;
pub mod finder;
pub mod transit;
pub mod web;
