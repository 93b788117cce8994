//! HTTP client for the email relay.
//!
//! # Endpoints
//!
//! - `POST /api/send-email` - deliver a report
//! - `GET /api/test-connection` - check the relay can reach its SMTP server
//! - `GET /health` - liveness probe

use std::sync::Arc;
use std::time::Duration;

use river_poultry_core::{HealthResponse, RelayResponse, SendEmailRequest};
use thiserror::Error;
use url::Url;

/// Errors that can occur when talking to the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// HTTP request failed or the body was not the expected JSON.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered but did not accept the request.
    #[error("Relay rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid relay URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Email relay client.
#[derive(Clone)]
pub struct RelayClient {
    inner: Arc<RelayClientInner>,
}

struct RelayClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl RelayClient {
    /// Create a client for the relay at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent())
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self {
            inner: Arc::new(RelayClientInner { client, base_url }),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Ask the relay to deliver a report.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Rejected` for a non-2xx status or a body with
    /// `success: false`, and `RelayError::Http` when the relay is unreachable.
    pub async fn send_email(&self, request: &SendEmailRequest) -> Result<RelayResponse, RelayError> {
        let url = self.inner.base_url.join("/api/send-email")?;
        let response = self.inner.client.post(url).json(request).send().await?;
        Self::handle_response(response).await
    }

    /// Check the relay's SMTP connection.
    ///
    /// # Errors
    ///
    /// Same as [`RelayClient::send_email`].
    pub async fn test_connection(&self) -> Result<RelayResponse, RelayError> {
        let url = self.inner.base_url.join("/api/test-connection")?;
        let response = self.inner.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Liveness probe.
    ///
    /// # Errors
    ///
    /// Returns error if the relay is unreachable or answers non-2xx.
    pub async fn health(&self) -> Result<HealthResponse, RelayError> {
        let url = self.inner.base_url.join("/health")?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }

    async fn handle_response(response: reqwest::Response) -> Result<RelayResponse, RelayError> {
        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str::<RelayResponse>(&text).ok();

        match body {
            Some(body) if status.is_success() && body.success => Ok(body),
            Some(body) => Err(RelayError::Rejected {
                status: status.as_u16(),
                message: body.message,
            }),
            None => Err(RelayError::Rejected {
                status: status.as_u16(),
                message: if text.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    text
                },
            }),
        }
    }
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// `User-Agent` sent on every planner request.
#[must_use]
pub fn user_agent() -> String {
    format!("river-poultry-planner/{}", env!("CARGO_PKG_VERSION"))
}
