//! Search request and parameter validation.

use std::ops::RangeInclusive;

use crate::domain::DepartureTime;

use super::error::FinderError;

/// Connections returned when no limit is given.
pub const DEFAULT_LIMIT: usize = 10;

/// Accepted values for `limit`.
pub const LIMIT_RANGE: RangeInclusive<usize> = 1..=50;

/// Departures board look-ahead when no duration is given (minutes).
pub const DEFAULT_DURATION_MINS: u32 = 240;

/// Accepted values for `duration` (minutes).
pub const DURATION_RANGE: RangeInclusive<u32> = 30..=720;

/// A request for the longest direct connections from a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestDirectRequest {
    /// Free-text origin station query.
    pub station: String,

    /// Maximum number of connections to return.
    pub limit: usize,

    /// Departures board look-ahead in minutes. Not a cap on trip length.
    pub duration_mins: u32,

    /// Start of the departures window; `None` means now.
    pub when: Option<DepartureTime>,
}

impl LongestDirectRequest {
    /// A request with default limit, duration and start time.
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            limit: DEFAULT_LIMIT,
            duration_mins: DEFAULT_DURATION_MINS,
            when: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_duration(mut self, duration_mins: u32) -> Self {
        self.duration_mins = duration_mins;
        self
    }

    pub fn with_when(mut self, when: impl Into<DepartureTime>) -> Self {
        self.when = Some(when.into());
        self
    }

    /// Build a request from raw query-string values.
    ///
    /// Blank optional values count as absent, which is what an HTML form
    /// submits for untouched fields. The result is validated.
    pub fn from_params(
        station: Option<&str>,
        limit: Option<&str>,
        duration: Option<&str>,
        when: Option<&str>,
    ) -> Result<Self, FinderError> {
        let mut request = Self::new(station.unwrap_or_default());

        if let Some(limit) = non_blank(limit) {
            request.limit = limit.parse().map_err(|_| {
                FinderError::Validation(format!("limit must be a positive integer, got '{limit}'"))
            })?;
        }

        if let Some(duration) = non_blank(duration) {
            request.duration_mins = duration.parse().map_err(|_| {
                FinderError::Validation(format!(
                    "duration must be a positive number of minutes, got '{duration}'"
                ))
            })?;
        }

        if let Some(when) = non_blank(when) {
            request.when = Some(DepartureTime::parse(when).map_err(|e| {
                FinderError::Validation(format!("when: {e}, got '{when}'"))
            })?);
        }

        request.validate()?;
        Ok(request)
    }

    /// Check the request before any upstream call is made.
    pub fn validate(&self) -> Result<(), FinderError> {
        if self.station_query().is_empty() {
            return Err(FinderError::Validation(
                "station must not be empty".to_string(),
            ));
        }

        if !LIMIT_RANGE.contains(&self.limit) {
            return Err(FinderError::Validation(format!(
                "limit must be between {} and {}, got {}",
                LIMIT_RANGE.start(),
                LIMIT_RANGE.end(),
                self.limit
            )));
        }

        if !DURATION_RANGE.contains(&self.duration_mins) {
            return Err(FinderError::Validation(format!(
                "duration must be between {} and {} minutes, got {}",
                DURATION_RANGE.start(),
                DURATION_RANGE.end(),
                self.duration_mins
            )));
        }

        Ok(())
    }

    /// The station query with surrounding whitespace removed.
    pub fn station_query(&self) -> &str {
        self.station.trim()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_validation(result: Result<LongestDirectRequest, FinderError>) -> bool {
        matches!(result, Err(FinderError::Validation(_)))
    }

    #[test]
    fn defaults() {
        let request = LongestDirectRequest::new("Koblenz Hbf");
        assert_eq!(request.limit, 10);
        assert_eq!(request.duration_mins, 240);
        assert_eq!(request.when, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn station_is_trimmed() {
        let request = LongestDirectRequest::new("  Koblenz Hbf \n");
        assert_eq!(request.station_query(), "Koblenz Hbf");
    }

    #[test]
    fn reject_empty_station() {
        assert!(LongestDirectRequest::new("").validate().is_err());
        assert!(LongestDirectRequest::new("   ").validate().is_err());
        assert!(is_validation(LongestDirectRequest::from_params(
            None, None, None, None
        )));
    }

    #[test]
    fn limit_bounds() {
        let request = LongestDirectRequest::new("Koblenz Hbf");
        assert!(request.clone().with_limit(0).validate().is_err());
        assert!(request.clone().with_limit(1).validate().is_ok());
        assert!(request.clone().with_limit(50).validate().is_ok());
        assert!(request.with_limit(51).validate().is_err());
    }

    #[test]
    fn duration_bounds() {
        let request = LongestDirectRequest::new("Koblenz Hbf");
        assert!(request.clone().with_duration(29).validate().is_err());
        assert!(request.clone().with_duration(30).validate().is_ok());
        assert!(request.clone().with_duration(720).validate().is_ok());
        assert!(request.with_duration(721).validate().is_err());
    }

    #[test]
    fn from_params_parses_values() {
        let request = LongestDirectRequest::from_params(
            Some("Koblenz Hbf"),
            Some("5"),
            Some("360"),
            Some("2025-11-29T08:00:00+01:00"),
        )
        .unwrap();

        assert_eq!(request.station, "Koblenz Hbf");
        assert_eq!(request.limit, 5);
        assert_eq!(request.duration_mins, 360);
        assert_eq!(
            request.when.map(|t| t.to_query_value()).as_deref(),
            Some("2025-11-29T08:00:00+01:00")
        );
    }

    #[test]
    fn from_params_accepts_iso_when_forms() {
        for (when, forwarded) in [
            ("2025-11-29T08:00:00", "2025-11-29T08:00:00"),
            ("2025-11-29T08:00+01:00", "2025-11-29T08:00:00+01:00"),
            ("2025-11-29T08:00", "2025-11-29T08:00:00"),
        ] {
            let request =
                LongestDirectRequest::from_params(Some("Koblenz Hbf"), None, None, Some(when))
                    .unwrap_or_else(|e| panic!("{when}: {e}"));
            assert_eq!(
                request.when.map(|t| t.to_query_value()).as_deref(),
                Some(forwarded),
                "{when}"
            );
        }
    }

    #[test]
    fn from_params_blank_values_use_defaults() {
        let request =
            LongestDirectRequest::from_params(Some("Trier"), Some(""), Some(" "), Some(""))
                .unwrap();
        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert_eq!(request.duration_mins, DEFAULT_DURATION_MINS);
        assert_eq!(request.when, None);
    }

    #[test]
    fn from_params_rejects_garbage() {
        assert!(is_validation(LongestDirectRequest::from_params(
            Some("Trier"),
            Some("ten"),
            None,
            None
        )));
        assert!(is_validation(LongestDirectRequest::from_params(
            Some("Trier"),
            Some("-3"),
            None,
            None
        )));
        assert!(is_validation(LongestDirectRequest::from_params(
            Some("Trier"),
            None,
            Some("4h"),
            None
        )));
        assert!(is_validation(LongestDirectRequest::from_params(
            Some("Trier"),
            None,
            None,
            Some("tomorrow")
        )));
    }
}
