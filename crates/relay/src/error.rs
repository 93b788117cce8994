//! Unified error handling for the relay.
//!
//! Every failure is answered with the same JSON shape the success path
//! uses: `{"success": false, "message": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use river_poultry_core::RelayResponse;
use thiserror::Error;

use crate::services::email::EmailError;

/// Application-level error type for the relay.
#[derive(Debug, Error)]
pub enum AppError {
    /// Email could not be built or delivered.
    #[error("{0}")]
    Email(#[from] EmailError),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Email(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Email(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Relay request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Email(e) if !e.is_client_error() => "Failed to send email".to_string(),
            _ => self.to_string(),
        };

        (status, Json(RelayResponse::failure(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("Missing required fields: to".to_string());
        assert_eq!(err.to_string(), "Missing required fields: to");

        let err = AppError::Email(EmailError::InvalidAddress("nobody".to_string()));
        assert_eq!(err.to_string(), "Invalid email address: nobody");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Email(EmailError::InvalidAddress("x".to_string()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
