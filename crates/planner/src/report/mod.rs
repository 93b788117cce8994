//! Report emitter.
//!
//! A budget is presented three ways: the terminal [`summary`], the paginated
//! [`document`] and the [`email`] body. All three render from one
//! [`ReportView`]. The [`emitter`] writes documents to disk and hands emails
//! to the relay, falling back to a local file plus a `mailto:` link when the
//! relay cannot deliver.

pub mod document;
pub mod email;
pub mod emitter;
pub mod summary;
pub mod view;

pub use document::Document;
pub use emitter::{EmailOutcome, Fallback, ReportEmitter};
pub use view::ReportView;

use thiserror::Error;

pub const COMPANY_NAME: &str = "River Poultry & SmartVet";
pub const COMPANY_WEBSITE: &str = "www.riverpoultry.com";
pub const BRAND_COLOR: &str = "#286844";
pub const BRAND_BACKGROUND: &str = "#f1f2b0";
pub const EMAIL_SUBJECT: &str = "Your Poultry Budget Report - River Poultry & SmartVet";
/// File name of the emitted document.
pub const REPORT_FILENAME: &str = "Poultry_Budget_Report.html";

/// Errors from rendering or emitting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requester has not given the contact details this action needs.
    #[error("{0}")]
    MissingContact(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] river_poultry_core::EmailError),
}
