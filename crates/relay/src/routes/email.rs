//! Report delivery and SMTP connectivity handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use river_poultry_core::{Email, RelayResponse, SendEmailRequest};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Check that the SMTP server is reachable; failures answer 500.
#[instrument(skip_all)]
pub async fn test_connection(State(state): State<AppState>) -> (StatusCode, Json<RelayResponse>) {
    match state.email().test_connection().await {
        Ok(true) => (
            StatusCode::OK,
            Json(RelayResponse::ok("SMTP connection successful")),
        ),
        Ok(false) => {
            tracing::warn!("SMTP connection refused");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayResponse::failure("SMTP connection failed")),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "SMTP connection test failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayResponse::failure(e.to_string())),
            )
        }
    }
}

/// Deliver a budget report.
///
/// # Errors
///
/// Returns 400 for missing fields, a bad recipient or a bad attachment, and
/// 500 when delivery fails.
#[instrument(skip_all, fields(to = tracing::field::Empty))]
pub async fn send_email(
    State(state): State<AppState>,
    body: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Json<RelayResponse>, AppError> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::Span::current().record("to", request.to.as_str());

    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    let to = Email::parse(&request.to)
        .map_err(|e| AppError::BadRequest(format!("Invalid recipient: {e}")))?;

    let message_id = state.email().send_report(&request).await?;

    Ok(Json(RelayResponse {
        success: true,
        message_id: Some(message_id),
        message: format!("Email sent successfully to {to}"),
    }))
}
