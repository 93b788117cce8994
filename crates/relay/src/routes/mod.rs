//! HTTP route handlers for the relay.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health               - Liveness probe
//! GET  /api/test-connection  - Verify SMTP connectivity
//! POST /api/send-email       - Deliver a budget report
//! ```

pub mod email;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the relay router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/test-connection", get(email::test_connection))
        .route("/api/send-email", post(email::send_email))
}
