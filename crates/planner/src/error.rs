//! Top-level error type for planner commands.

use thiserror::Error;

use crate::config::ConfigError;
use crate::relay_client::RelayError;
use crate::report::ReportError;
use crate::store::StoreError;

/// Anything a planner command can fail with.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// A value given on the command line was rejected.
    #[error("Invalid {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    /// No ingredient, vaccination or drug has this id.
    #[error("No entry with id {0}")]
    UnknownEntry(String),

    /// The wizard cannot leave the current step.
    #[error("Step \"{0}\" is incomplete")]
    StepIncomplete(&'static str),
}

impl PlannerError {
    pub fn invalid(field: &'static str, message: impl ToString) -> Self {
        Self::InvalidValue {
            field,
            message: message.to_string(),
        }
    }
}
