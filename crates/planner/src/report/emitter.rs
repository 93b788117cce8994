//! Writes report documents and sends report emails.
//!
//! Delivery goes through the email relay. When the relay fails for any
//! reason the emitter falls back to writing the document locally and
//! building a pre-filled `mailto:` link; opening the mail client is best
//! effort.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use river_poultry_core::{ContactInfo, SendEmailRequest};
use tokio::process::Command;

use super::document::Document;
use super::view::ReportView;
use super::{EMAIL_SUBJECT, REPORT_FILENAME, ReportError, email};
use crate::relay_client::RelayClient;

/// How an email request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailOutcome {
    /// The relay accepted the report.
    Sent {
        to: String,
        message_id: Option<String>,
    },
    /// The relay failed; the farmer has to send it themselves.
    Fallback(Fallback),
}

/// Local copy and compose link produced when the relay fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    /// Why the relay could not deliver.
    pub reason: String,
    pub document: PathBuf,
    pub mailto: String,
    /// Whether a mail client was launched.
    pub opened: bool,
}

/// Emits reports to disk and through the relay.
#[derive(Debug, Clone)]
pub struct ReportEmitter {
    relay: RelayClient,
    output_dir: PathBuf,
    launch_mail_client: bool,
}

impl ReportEmitter {
    pub fn new(relay: RelayClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            relay,
            output_dir: output_dir.into(),
            launch_mail_client: false,
        }
    }

    /// Try to open the system mail client on fallback.
    #[must_use]
    pub const fn with_mail_client(mut self, launch: bool) -> Self {
        self.launch_mail_client = launch;
        self
    }

    /// Write the printable document for download.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::MissingContact` when neither phone nor email is
    /// set, or an error if rendering or writing fails.
    pub fn download(&self, view: &ReportView, contact: &ContactInfo) -> Result<PathBuf, ReportError> {
        if !contact.can_download() {
            return Err(ReportError::MissingContact(
                "Enter a phone number or email address before downloading the report",
            ));
        }
        let html = Document::layout(view).render_html()?;
        self.write_document(&html)
    }

    /// Email the report to the requester, falling back on relay failure.
    ///
    /// # Errors
    ///
    /// Returns error if the email address is missing or invalid, or if
    /// rendering fails. Relay failures are not errors; they produce
    /// [`EmailOutcome::Fallback`].
    pub async fn email(&self, view: &ReportView, contact: &ContactInfo) -> Result<EmailOutcome, ReportError> {
        if !contact.has_email() {
            return Err(ReportError::MissingContact(
                "Please enter an email address to send the report.",
            ));
        }
        let to = contact.email_address()?;
        let document = Document::layout(view).render_html()?;
        let request = build_request(view, to.as_str(), &document)?;

        match self.relay.send_email(&request).await {
            Ok(response) => {
                tracing::info!(to = %to, message_id = ?response.message_id, "Report emailed");
                Ok(EmailOutcome::Sent {
                    to: to.to_string(),
                    message_id: response.message_id,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Relay failed, falling back to local copy");
                let path = self.write_document(&document)?;
                let mailto = mailto_link(to.as_str(), &email::render_text(view)?);
                let opened = self.launch_mail_client && open_mail_client(&mailto).await;
                Ok(EmailOutcome::Fallback(Fallback {
                    reason: e.to_string(),
                    document: path,
                    mailto,
                    opened,
                }))
            }
        }
    }

    fn write_document(&self, html: &str) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(REPORT_FILENAME);
        write_file(&path, html)?;
        tracing::info!(path = %path.display(), "Report written");
        Ok(path)
    }
}

/// Build the relay request for a rendered document.
///
/// # Errors
///
/// Returns error if the email body fails to render.
pub fn build_request(view: &ReportView, to: &str, document_html: &str) -> Result<SendEmailRequest, ReportError> {
    Ok(SendEmailRequest {
        to: to.to_string(),
        recipient_name: Some(view.recipient_name.clone()),
        subject: EMAIL_SUBJECT.to_string(),
        html_content: email::render_html(view)?,
        pdf_base64: BASE64.encode(document_html),
        pdf_filename: Some(REPORT_FILENAME.to_string()),
    })
}

/// `mailto:` link with URL-encoded subject and body.
#[must_use]
pub fn mailto_link(to: &str, body: &str) -> String {
    format!(
        "mailto:{to}?subject={}&body={}",
        urlencoding::encode(EMAIL_SUBJECT),
        urlencoding::encode(body)
    )
}

/// Write `contents` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns `ReportError::Write` on IO failure.
pub fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}

/// Hand a link to the platform opener. Returns whether it succeeded.
async fn open_mail_client(link: &str) -> bool {
    let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    };
    run_opener(program, args, link).await
}

/// Run an opener to completion. Openers exit once the desktop has the link.
async fn run_opener(program: &str, args: &[&str], link: &str) -> bool {
    match Command::new(program)
        .args(args)
        .arg(link)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
    {
        Ok(status) if status.success() => true,
        Ok(status) => {
            tracing::warn!(%status, program, "Mail client opener failed");
            false
        }
        Err(e) => {
            tracing::warn!(error = %e, program, "Could not open mail client");
            false
        }
    }
}
