//! Relay diagnostics.

use river_poultry_planner::PlannerError;

use super::{Context, say};

/// Check the relay is up and can reach its SMTP server.
pub async fn check(ctx: &Context) -> Result<(), PlannerError> {
    let relay = &ctx.relay;
    say(format!("Relay: {}", relay.base_url()));

    let health = relay.health().await?;
    say(format!("Service: {} ({})", health.status, health.message));

    match relay.test_connection().await {
        Ok(response) => say(format!("SMTP: {}", response.message)),
        Err(e) => {
            tracing::warn!(error = %e, "SMTP connection test failed");
            say(format!("SMTP: {e}"));
        }
    }
    Ok(())
}
