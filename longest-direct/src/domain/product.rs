//! Transit product classification.
//!
//! The upstream API labels every line with a product name such as
//! `"regionalExpress"` or `"bus"`. Only the regional rail products (RE, RB
//! and S-Bahn) are of interest for direct connections.

use std::fmt;

use serde::Serialize;

/// Product category of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Product {
    /// ICE
    NationalExpress,
    /// IC / EC
    National,
    /// RE
    RegionalExpress,
    /// RB
    Regional,
    /// S-Bahn
    Suburban,
    Bus,
    Ferry,
    /// U-Bahn
    Subway,
    Tram,
    Taxi,
}

impl Product {
    /// Products the departures board is asked to include.
    pub const REGIONAL: [Product; 3] = [
        Product::RegionalExpress,
        Product::Regional,
        Product::Suburban,
    ];

    /// Products the departures board is asked to exclude.
    pub const EXCLUDED: [Product; 7] = [
        Product::NationalExpress,
        Product::National,
        Product::Bus,
        Product::Ferry,
        Product::Subway,
        Product::Tram,
        Product::Taxi,
    ];

    /// Map an upstream product name to a known product.
    ///
    /// Returns `None` for anything unrecognised, including bare modes like
    /// `"train"`.
    pub fn from_upstream(name: &str) -> Option<Self> {
        match name {
            "nationalExpress" => Some(Self::NationalExpress),
            "national" => Some(Self::National),
            "regionalExpress" => Some(Self::RegionalExpress),
            "regional" => Some(Self::Regional),
            "suburban" => Some(Self::Suburban),
            "bus" => Some(Self::Bus),
            "ferry" => Some(Self::Ferry),
            "subway" => Some(Self::Subway),
            "tram" => Some(Self::Tram),
            "taxi" => Some(Self::Taxi),
            _ => None,
        }
    }

    /// Resolve a product name, defaulting unrecognised values to `Regional`.
    pub fn resolve(name: &str) -> Self {
        Self::from_upstream(name).unwrap_or(Self::Regional)
    }

    /// The query flag name the upstream API uses for this product.
    pub const fn upstream_name(&self) -> &'static str {
        match self {
            Self::NationalExpress => "nationalExpress",
            Self::National => "national",
            Self::RegionalExpress => "regionalExpress",
            Self::Regional => "regional",
            Self::Suburban => "suburban",
            Self::Bus => "bus",
            Self::Ferry => "ferry",
            Self::Subway => "subway",
            Self::Tram => "tram",
            Self::Taxi => "taxi",
        }
    }

    /// Whether this is a regional rail product (RE, RB or S-Bahn).
    pub fn is_regional(&self) -> bool {
        Self::REGIONAL.contains(self)
    }

    /// Name used in API output, e.g. `"regional-express"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NationalExpress => "national-express",
            Self::National => "national",
            Self::RegionalExpress => "regional-express",
            Self::Regional => "regional",
            Self::Suburban => "suburban",
            Self::Bus => "bus",
            Self::Ferry => "ferry",
            Self::Subway => "subway",
            Self::Tram => "tram",
            Self::Taxi => "taxi",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
