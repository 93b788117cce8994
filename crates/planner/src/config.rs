//! Planner configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PLANNER_DATA_DIR` - Where the saved form and leads live (default: .river-poultry)
//! - `PLANNER_OUTPUT_DIR` - Where reports and calendars are written (default: .)
//! - `PLANNER_RELAY_URL` - Email relay base URL (default: `http://localhost:5001`)
//! - `PLANNER_TRACKING_URL` - Endpoint that collects leads; unset disables upload
//! - `PLANNER_RELAY_TIMEOUT_SECS` - HTTP timeout for relay and tracking calls (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Planner configuration.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Directory holding the local key-value store
    pub data_dir: PathBuf,
    /// Directory reports are written to
    pub output_dir: PathBuf,
    /// Base URL of the email relay
    pub relay_url: Url,
    /// Lead collection endpoint
    pub tracking_url: Option<Url>,
    /// Timeout for outgoing HTTP requests
    pub http_timeout: Duration,
}

impl PlannerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL or the timeout does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`PlannerConfig::from_env`].
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let relay_url = parse_url(
            "PLANNER_RELAY_URL",
            &get_env_or_default(lookup, "PLANNER_RELAY_URL", "http://localhost:5001"),
        )?;
        let tracking_url = get_optional_env(lookup, "PLANNER_TRACKING_URL")
            .map(|raw| parse_url("PLANNER_TRACKING_URL", &raw))
            .transpose()?;
        let timeout_secs = get_env_or_default(lookup, "PLANNER_RELAY_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PLANNER_RELAY_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            data_dir: PathBuf::from(get_env_or_default(lookup, "PLANNER_DATA_DIR", ".river-poultry")),
            output_dir: PathBuf::from(get_env_or_default(lookup, "PLANNER_OUTPUT_DIR", ".")),
            relay_url,
            tracking_url,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_optional_env(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(lookup: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<PlannerConfig, ConfigError> {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        PlannerConfig::from_lookup(&|key| vars.get(key).map(|v| (*v).to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".river-poultry"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.relay_url.as_str(), "http://localhost:5001/");
        assert!(config.tracking_url.is_none());
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PLANNER_RELAY_URL", "https://relay.riverpoultry.com"),
            ("PLANNER_TRACKING_URL", "https://leads.riverpoultry.com/api/leads"),
            ("PLANNER_RELAY_TIMEOUT_SECS", "5"),
            ("PLANNER_OUTPUT_DIR", "/tmp/reports"),
        ])
        .unwrap();
        assert_eq!(config.relay_url.host_str(), Some("relay.riverpoultry.com"));
        assert_eq!(
            config.tracking_url.unwrap().path(),
            "/api/leads"
        );
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_empty_tracking_url_is_unset() {
        let config = load(&[("PLANNER_TRACKING_URL", "  ")]).unwrap();
        assert!(config.tracking_url.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("PLANNER_RELAY_URL", "not a url")]).is_err());
        assert!(load(&[("PLANNER_RELAY_TIMEOUT_SECS", "soon")]).is_err());
    }
}
