//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::transit::{DEFAULT_BASE_URL, TransitConfig};

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Origins allowed by default (local development and the hosted frontend).
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:3000",
    "http://localhost:4173",
    "http://127.0.0.1:8000",
    "http://localhost:8000",
    "https://cognifex.github.io",
];

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`*`).
    Any,
    /// Only the listed origins.
    List(Vec<String>),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Upstream transit client settings.
    pub transit: TransitConfig,

    /// Allowed CORS origins.
    pub cors_origins: CorsOrigins,

    /// Serve from this fixture directory instead of the live API.
    pub mock_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            transit: TransitConfig::default(),
            cors_origins: CorsOrigins::List(
                DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            ),
            mock_dir: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// - `DB_API_BASE`: upstream base URL
    /// - `BIND_ADDR`: listen address
    /// - `CORS_ORIGINS`: comma-separated origins, or `*`
    /// - `TRANSIT_MAX_CONCURRENT`: max in-flight upstream requests
    /// - `TRANSIT_MOCK_DIR`: fixture directory for offline use
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        let base_url = get("DB_API_BASE").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        config.transit = config.transit.with_base_url(base_url.trim());

        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr.trim().parse().map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                message: format!("{e} ('{addr}')"),
            })?;
        }

        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = parse_cors_origins(&origins);
        }

        if let Some(max) = get("TRANSIT_MAX_CONCURRENT") {
            let max: usize = max
                .trim()
                .parse()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "TRANSIT_MAX_CONCURRENT",
                    message: format!("expected a positive integer, got '{max}'"),
                })?;
            config.transit = config.transit.with_max_concurrent(max);
        }

        config.mock_dir = get("TRANSIT_MOCK_DIR").map(|dir| PathBuf::from(dir.trim()));

        Ok(config)
    }
}

fn parse_cors_origins(value: &str) -> CorsOrigins {
    let origins: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();

    if origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}
