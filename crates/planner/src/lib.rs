//! River Poultry budget planner.
//!
//! The planner walks a farmer through the budget wizard from the terminal,
//! keeps the form in a local store between runs, and emits reports as a
//! summary, a printable document or an email sent through the relay.
//!
//! # Modules
//!
//! - [`config`] - environment configuration
//! - [`store`] - local key-value store
//! - [`session`] - saved form and wizard position
//! - [`relay_client`] - HTTP client for the email relay
//! - [`leads`] - lead tracking
//! - [`report`] - summary, document, email and the emitter

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod leads;
pub mod relay_client;
pub mod report;
pub mod session;
pub mod store;

pub use config::PlannerConfig;
pub use error::PlannerError;
pub use leads::LeadTracker;
pub use relay_client::RelayClient;
pub use session::Session;
pub use store::FileStore;
