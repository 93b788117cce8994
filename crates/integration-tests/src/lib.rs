//! Integration tests for River Poultry.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p river-poultry-integration-tests
//! ```
//!
//! Nothing external is needed: the relay runs in-process with an in-memory
//! mail transport, and the planner keeps its state in temporary directories.
//!
//! # Test Categories
//!
//! - `relay_api` - relay HTTP contract
//! - `report_delivery` - planner reports delivered through a live relay
//! - `planner_session` - saved sessions and report consistency

use std::net::SocketAddr;

use axum::Router;
use axum::http::HeaderValue;
use river_poultry_core::{BirdType, BudgetForm, CurrencyCode, HealthKind};
use river_poultry_relay::services::email::EmailService;
use river_poultry_relay::state::AppState;
use rust_decimal::Decimal;
use tokio::net::TcpListener;
use url::Url;

/// Origin the test relay allows.
pub const TEST_ORIGIN: &str = "http://localhost:5173";

/// Relay router backed by a transport that accepts every message.
///
/// # Panics
///
/// Panics if the sender address is rejected.
#[must_use]
pub fn relay_app() -> Router {
    let email = EmailService::in_memory("River Poultry & SmartVet", "reports@riverpoultry.com")
        .expect("Failed to create in-memory email service");
    river_poultry_relay::app(AppState::new(email), HeaderValue::from_static(TEST_ORIGIN))
}

/// Serve the relay on an ephemeral local port and return its base URL.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn spawn_relay() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind relay listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, relay_app())
            .await
            .expect("Relay server failed");
    });
    base_url(addr)
}

/// A base URL on which nothing is listening.
///
/// # Panics
///
/// Panics if no local port can be bound.
#[must_use]
pub fn dead_relay_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe");
    let addr = listener.local_addr().expect("Probe has no address");
    drop(listener);
    base_url(addr)
}

fn base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}")).expect("Socket address is a valid URL")
}

/// A 500-bird broiler budget in Kenyan shillings with health costs and a
/// contact email.
#[must_use]
pub fn broiler_form() -> BudgetForm {
    let mut form = BudgetForm::new();
    form.set_bird_type(BirdType::Broiler);
    form.currency_code = CurrencyCode::KES;
    form.num_birds = "500".to_string();
    form.production_period = "42".to_string();
    form.doc_cost_per_chick = "95".to_string();
    form.broiler_price = "550".to_string();
    form.labour_cost = "8000".to_string();
    form.water_cost = "1500".to_string();
    form.brooding_cost = "4000".to_string();
    form.add_health_entry(
        HealthKind::Vaccination,
        "Newcastle (Lasota)",
        Decimal::from(7),
        Decimal::from(1200),
        "eye drop",
    );
    form.add_health_entry(
        HealthKind::Drug,
        "Coccidiostat",
        Decimal::from(21),
        Decimal::from(900),
        "",
    );
    form.contact_info.email = "farmer@example.com".to_string();
    form.contact_info.phone = "712345678".to_string();
    form
}

/// A 300-layer budget in Ugandan shillings with the recommended vaccines.
#[must_use]
pub fn layer_form() -> BudgetForm {
    let mut form = BudgetForm::new();
    form.set_bird_type(BirdType::Layer);
    form.num_birds = "300".to_string();
    form.production_period = "72".to_string();
    form.doc_cost_per_chick = "3500".to_string();
    form.egg_price = "12000".to_string();
    form.labour_cost = "150000".to_string();
    form.add_recommended_vaccines();
    form.contact_info.phone = "772000111".to_string();
    form.contact_info.country_code = "+256".to_string();
    form
}
