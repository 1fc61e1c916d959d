//! Timestamp handling for upstream stopover times.
//!
//! The transit API reports times as ISO-8601 strings with a UTC offset, e.g.
//! `"2025-11-29T08:14:00+01:00"`. Actual (realtime) and planned values are
//! separate fields and either may be missing.
//!
//! Requested board start times are looser: [`DepartureTime`] also takes
//! minute precision and wall-clock times without an offset.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Serialize;

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimestampError {
    reason: &'static str,
}

impl TimestampError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// An offset-aware point in time.
///
/// # Examples
///
/// ```
/// use longest_direct::domain::Timestamp;
///
/// let dep = Timestamp::parse("2025-11-29T08:14:00+01:00").unwrap();
/// let arr = Timestamp::parse("2025-11-29T10:05:30+01:00").unwrap();
/// assert_eq!(dep.whole_minutes_until(&arr), 111);
///
/// // Offsets are required
/// assert!(Timestamp::parse("2025-11-29T08:14:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Wrap an existing chrono value.
    pub fn new(inner: DateTime<FixedOffset>) -> Self {
        Self(inner)
    }

    /// Parse an RFC 3339 / ISO-8601 timestamp with offset.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimestampError::new("empty string"));
        }

        DateTime::parse_from_rfc3339(s)
            .map(Self)
            .map_err(|_| TimestampError::new("expected ISO-8601 date-time with offset"))
    }

    /// Whole minutes from `self` until `later`, truncated toward zero.
    ///
    /// Negative when `later` is actually earlier.
    pub fn whole_minutes_until(&self, later: &Timestamp) -> i64 {
        later.0.signed_duration_since(self.0).num_minutes()
    }

    /// RFC 3339 representation, as sent to the upstream API.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Local wall-clock time in `HH:MM`, for display.
    pub fn hhmm(&self) -> String {
        self.0.format("%H:%M").to_string()
    }

    /// Underlying chrono value.
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0.to_rfc3339())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Requested start of a departures board.
///
/// Wall-clock values without an offset are passed on as they are; the
/// upstream reads them as German local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartureTime {
    Zoned(Timestamp),
    Local(NaiveDateTime),
}

impl DepartureTime {
    /// Parse an ISO-8601 date-time, with or without seconds and offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use longest_direct::domain::DepartureTime;
    ///
    /// let local = DepartureTime::parse("2025-11-29T08:00").unwrap();
    /// assert_eq!(local.to_query_value(), "2025-11-29T08:00:00");
    ///
    /// let zoned = DepartureTime::parse("2025-11-29T08:00+01:00").unwrap();
    /// assert_eq!(zoned.to_query_value(), "2025-11-29T08:00:00+01:00");
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimestampError::new("empty string"));
        }

        if let Ok(zoned) = DateTime::parse_from_rfc3339(s) {
            return Ok(DepartureTime::Zoned(Timestamp(zoned)));
        }
        if let Ok(zoned) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
            return Ok(DepartureTime::Zoned(Timestamp(zoned)));
        }
        if let Ok(local) = s.parse::<NaiveDateTime>() {
            return Ok(DepartureTime::Local(local));
        }

        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .map(DepartureTime::Local)
            .map_err(|_| TimestampError::new("expected ISO-8601 date-time"))
    }

    /// Value of the upstream `when` query parameter.
    pub fn to_query_value(&self) -> String {
        match self {
            DepartureTime::Zoned(ts) => ts.to_rfc3339(),
            DepartureTime::Local(local) => local.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

impl From<Timestamp> for DepartureTime {
    fn from(ts: Timestamp) -> Self {
        DepartureTime::Zoned(ts)
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}
