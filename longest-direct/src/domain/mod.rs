//! Domain types for longest direct connections.
//!
//! Validated values that the rest of the crate can trust: stations,
//! product categories, timestamps, and the connections built from them.

mod connection;
mod fallback;
mod product;
mod station;
mod time;

pub use connection::{Connection, ConnectionKey};
pub use fallback::{Accessor, first_present, first_present_or};
pub use product::Product;
pub use station::{InvalidStation, Station};
pub use time::{DepartureTime, Timestamp, TimestampError};
