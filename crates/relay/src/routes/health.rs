//! Liveness probe.

use axum::Json;
use river_poultry_core::HealthResponse;

/// Returns ok if the server is running. Does not check SMTP.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Email service is running".to_string(),
    })
}
