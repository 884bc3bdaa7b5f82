//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `GROOVY_STATE_PATH` - Where the cart and filter state is persisted
//!   (default: `.groovy/cart-store.json`)
//! - `GROOVY_CATALOG_PATH` - Product feed file (default: bundled feed)
//! - `GROOVY_CATALOG_LATENCY_MIN_MS` - Lower bound of simulated latency (default: 250)
//! - `GROOVY_CATALOG_LATENCY_MAX_MS` - Upper bound of simulated latency (default: 1000)
//! - `GROOVY_CATALOG_FAILURE_RATE` - Probability of a simulated fetch failure,
//!   0.0 to 1.0 (default: 0.0)
//! - `GROOVY_CATALOG_CACHE_TTL_SECS` - How long listings stay fresh (default: 5)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_STATE_PATH: &str = ".groovy/cart-store.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// File the session state is mirrored to
    pub state_path: PathBuf,
    /// Catalog service configuration
    pub catalog: CatalogConfig,
}

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Product feed file; `None` uses the bundled feed
    pub data_path: Option<PathBuf>,
    /// Shortest simulated response time
    pub latency_min: Duration,
    /// Longest simulated response time
    pub latency_max: Duration,
    /// Probability that an uncached call fails
    pub failure_rate: f64,
    /// Time-to-live of cached listings
    pub cache_ttl: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            latency_min: Duration::from_millis(250),
            latency_max: Duration::from_millis(1000),
            failure_rate: 0.0,
            cache_ttl: Duration::from_secs(5),
        }
    }
}

impl CatalogConfig {
    /// No latency and no failures; used by tests and offline tooling.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            latency_min: Duration::ZERO,
            latency_max: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let state_path = lookup("GROOVY_STATE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STATE_PATH), PathBuf::from);

        let catalog = CatalogConfig::from_lookup(&lookup)?;

        Ok(Self {
            state_path,
            catalog,
        })
    }
}

impl CatalogConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let latency_min = parse_or(lookup, "GROOVY_CATALOG_LATENCY_MIN_MS", 250_u64)?;
        let latency_max = parse_or(lookup, "GROOVY_CATALOG_LATENCY_MAX_MS", 1000_u64)?;
        if latency_min > latency_max {
            return Err(ConfigError::InvalidEnvVar(
                "GROOVY_CATALOG_LATENCY_MIN_MS".to_string(),
                format!("must not exceed GROOVY_CATALOG_LATENCY_MAX_MS ({latency_max})"),
            ));
        }

        let failure_rate = parse_or(lookup, "GROOVY_CATALOG_FAILURE_RATE", defaults.failure_rate)?;
        if !(0.0..=1.0).contains(&failure_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "GROOVY_CATALOG_FAILURE_RATE".to_string(),
                format!("must be between 0.0 and 1.0 (got {failure_rate})"),
            ));
        }

        let cache_ttl = parse_or(lookup, "GROOVY_CATALOG_CACHE_TTL_SECS", 5_u64)?;

        Ok(Self {
            data_path: lookup("GROOVY_CATALOG_PATH").map(PathBuf::from),
            latency_min: Duration::from_millis(latency_min),
            latency_max: Duration::from_millis(latency_max),
            failure_rate,
            cache_ttl: Duration::from_secs(cache_ttl),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, using `default` when it is unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.state_path, PathBuf::from(".groovy/cart-store.json"));
        assert!(config.catalog.data_path.is_none());
        assert_eq!(config.catalog.latency_min, Duration::from_millis(250));
        assert_eq!(config.catalog.latency_max, Duration::from_millis(1000));
        assert!(config.catalog.failure_rate.abs() < f64::EPSILON);
        assert_eq!(config.catalog.cache_ttl, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("GROOVY_STATE_PATH", "/tmp/cart.json"),
            ("GROOVY_CATALOG_PATH", "feed.json"),
            ("GROOVY_CATALOG_LATENCY_MIN_MS", "0"),
            ("GROOVY_CATALOG_LATENCY_MAX_MS", "10"),
            ("GROOVY_CATALOG_FAILURE_RATE", "0.25"),
            ("GROOVY_CATALOG_CACHE_TTL_SECS", "60"),
        ])
        .unwrap();
        assert_eq!(config.state_path, PathBuf::from("/tmp/cart.json"));
        assert_eq!(config.catalog.data_path, Some(PathBuf::from("feed.json")));
        assert_eq!(config.catalog.latency_max, Duration::from_millis(10));
        assert!((config.catalog.failure_rate - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.catalog.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_number() {
        let err = config_from(&[("GROOVY_CATALOG_LATENCY_MAX_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "GROOVY_CATALOG_LATENCY_MAX_MS"));
    }

    #[test]
    fn test_latency_bounds_must_be_ordered() {
        let err = config_from(&[
            ("GROOVY_CATALOG_LATENCY_MIN_MS", "500"),
            ("GROOVY_CATALOG_LATENCY_MAX_MS", "100"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_failure_rate_out_of_range() {
        assert!(config_from(&[("GROOVY_CATALOG_FAILURE_RATE", "1.5")]).is_err());
        assert!(config_from(&[("GROOVY_CATALOG_FAILURE_RATE", "NaN")]).is_err());
    }

    #[test]
    fn test_instant_has_no_latency() {
        let config = CatalogConfig::instant();
        assert_eq!(config.latency_min, Duration::ZERO);
        assert_eq!(config.latency_max, Duration::ZERO);
    }
}
