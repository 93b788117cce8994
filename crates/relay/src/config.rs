//! Relay configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SMTP_USERNAME` - SMTP authentication username
//! - `SMTP_PASSWORD` - SMTP authentication password
//!
//! ## Optional
//! - `RELAY_HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 5001)
//! - `CORS_ORIGIN` - Allowed browser origin (default: `http://localhost:3000`)
//! - `SMTP_HOST` - SMTP server hostname (default: smtp.zoho.com)
//! - `SMTP_PORT` - SMTP port (default: 465)
//! - `SMTP_SECURE` - `true` for implicit TLS, `false` for STARTTLS
//!   (default: true on port 465, false otherwise)
//! - `EMAIL_FROM` - Sender address (default: `SMTP_USERNAME`)
//! - `EMAIL_FROM_NAME` - Sender display name (default: River Poultry & `SmartVet`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

const IMPLICIT_TLS_PORT: u16 = 465;
const DEFAULT_FROM_NAME: &str = "River Poultry & SmartVet";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origin allowed by CORS
    pub cors_origin: HeaderValue,
    /// SMTP settings
    pub email: EmailConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// SMTP configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Implicit TLS when true, STARTTLS otherwise.
    pub smtp_secure: bool,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    /// Sender address (From header)
    pub from_address: String,
    /// Sender display name
    pub from_name: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_secure", &self.smtp_secure)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .finish()
    }
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the SMTP password looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`RelayConfig::from_env`].
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&vars);

        let host = env
            .or_default("RELAY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("RELAY_HOST".to_string(), e.to_string()))?;

        let port = env
            .or_default("PORT", "5001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let cors_origin = env
            .or_default("CORS_ORIGIN", "http://localhost:3000")
            .parse::<HeaderValue>()
            .map_err(|e| ConfigError::InvalidEnvVar("CORS_ORIGIN".to_string(), e.to_string()))?;

        let email = EmailConfig::from_env(&env)?;

        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            host,
            port,
            cors_origin,
            email,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let smtp_port = env
            .or_default("SMTP_PORT", "465")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string()))?;

        let smtp_secure = match env.optional("SMTP_SECURE") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::InvalidEnvVar("SMTP_SECURE".to_string(), value))?,
            None => smtp_port == IMPLICIT_TLS_PORT,
        };

        let smtp_username = env.required("SMTP_USERNAME")?;
        let smtp_password = env.required("SMTP_PASSWORD")?;
        validate_secret(&smtp_password, "SMTP_PASSWORD")?;

        Ok(Self {
            smtp_host: env.or_default("SMTP_HOST", "smtp.zoho.com"),
            smtp_port,
            smtp_secure,
            from_address: env.optional("EMAIL_FROM").unwrap_or_else(|| smtp_username.clone()),
            from_name: env.or_default("EMAIL_FROM_NAME", DEFAULT_FROM_NAME),
            smtp_username,
            smtp_password: SecretString::from(smtp_password),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup; empty values count as unset.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Reject secrets that are obviously placeholders.
fn validate_secret(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<RelayConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RelayConfig::from_vars(|key| vars.get(key).cloned())
    }

    const CREDENTIALS: &[(&str, &str)] = &[
        ("SMTP_USERNAME", "reports@riverpoultry.com"),
        ("SMTP_PASSWORD", "k7Qp2vNx9Lm4"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(CREDENTIALS).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5001");
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.email.smtp_host, "smtp.zoho.com");
        assert_eq!(config.email.smtp_port, 465);
        assert!(config.email.smtp_secure);
        assert_eq!(config.email.from_address, "reports@riverpoultry.com");
        assert_eq!(config.email.from_name, "River Poultry & SmartVet");
        assert_eq!(config.email.smtp_password.expose_secret(), "k7Qp2vNx9Lm4");
    }

    #[test]
    fn test_starttls_by_default_on_other_ports() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("SMTP_PORT", "587"));
        let config = load(&pairs).unwrap();
        assert!(!config.email.smtp_secure);

        pairs.push(("SMTP_SECURE", "true"));
        let config = load(&pairs).unwrap();
        assert!(config.email.smtp_secure);
    }

    #[test]
    fn test_missing_credentials() {
        let err = load(&[("SMTP_USERNAME", "a@b.co")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "SMTP_PASSWORD"));
    }

    #[test]
    fn test_placeholder_password_rejected() {
        let err = load(&[("SMTP_USERNAME", "a@b.co"), ("SMTP_PASSWORD", "changeme")]).unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_invalid_values() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("PORT", "http"));
        assert!(matches!(load(&pairs).unwrap_err(), ConfigError::InvalidEnvVar(_, _)));

        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("SMTP_SECURE", "maybe"));
        assert!(matches!(load(&pairs).unwrap_err(), ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = load(CREDENTIALS).unwrap();
        let debug = format!("{:?}", config.email);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("k7Qp2vNx9Lm4"));
    }
}
