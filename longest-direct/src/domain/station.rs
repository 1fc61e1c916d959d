//! Station identity.

use std::fmt;

use serde::Serialize;

/// Error returned when building a station from an unusable identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// A stop or station as known to the upstream transit API.
///
/// The `id` is the upstream's canonical identifier (an IBNR-like string such
/// as `"8000206"`) and is the only thing compared when matching stopovers.
/// The `name` is for display only.
///
/// # Examples
///
/// ```
/// use longest_direct::domain::Station;
///
/// let koblenz = Station::new("8000206", "Koblenz Hbf").unwrap();
/// assert_eq!(koblenz.id(), "8000206");
///
/// // Blank identifiers are rejected
/// assert!(Station::new("  ", "Nowhere").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Station {
    id: String,
    name: String,
}

impl Station {
    /// Build a station. The identifier is trimmed and must not be empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, InvalidStation> {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() {
            return Err(InvalidStation {
                reason: "identifier must not be empty",
            });
        }

        Ok(Self {
            id: id.to_string(),
            name: name.into(),
        })
    }

    /// Upstream station identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `other_id` refers to this station.
    pub fn matches_id(&self, other_id: &str) -> bool {
        self.id == other_id
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
