//! Budget report delivery over SMTP.
//!
//! Uses lettre for delivery. The report arrives base64-encoded and is
//! attached as-is; the HTML body is sent verbatim.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Attachment, Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
    transport::stub::AsyncStubTransport,
};
use river_poultry_core::{Email, SendEmailRequest};
use secrecy::ExposeSecret;
use thiserror::Error;
use uuid::Uuid;

use crate::config::EmailConfig;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// The in-memory transport refused the message.
    #[error("Transport error: {0}")]
    Stub(#[from] lettre::transport::stub::Error),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Attachment is not valid base64.
    #[error("Invalid attachment: {0}")]
    InvalidAttachment(#[from] base64::DecodeError),
}

impl EmailError {
    /// Whether the caller sent something unusable, as opposed to a delivery failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAddress(_) | Self::InvalidAttachment(_))
    }
}

#[derive(Clone)]
enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    Stub(AsyncStubTransport),
}

/// Sends budget reports.
#[derive(Clone)]
pub struct EmailService {
    transport: Transport,
    from: Mailbox,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// No connection is made until the first send or connection test.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP host or sender address is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let builder = if config.smtp_secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };
        let mailer = builder
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            transport: Transport::Smtp(mailer),
            from: sender(&config.from_name, &config.from_address)?,
        })
    }

    /// An email service that accepts every message without sending it.
    ///
    /// # Errors
    ///
    /// Returns error if the sender address is invalid.
    pub fn in_memory(from_name: &str, from_address: &str) -> Result<Self, EmailError> {
        Ok(Self {
            transport: Transport::Stub(AsyncStubTransport::new_ok()),
            from: sender(from_name, from_address)?,
        })
    }

    /// Check that the SMTP server accepts our connection and credentials.
    ///
    /// # Errors
    ///
    /// Returns error if the connection cannot be established.
    pub async fn test_connection(&self) -> Result<bool, EmailError> {
        match &self.transport {
            Transport::Smtp(mailer) => Ok(mailer.test_connection().await?),
            Transport::Stub(_) => Ok(true),
        }
    }

    /// Send a budget report with its document attached.
    ///
    /// Returns the Message-ID of the sent email.
    ///
    /// # Errors
    ///
    /// Returns error if the recipient or attachment is invalid, or delivery fails.
    pub async fn send_report(&self, request: &SendEmailRequest) -> Result<String, EmailError> {
        let to = recipient(request.recipient_name_or_default(), &request.to)?;
        let filename = request.filename_or_default();
        let document = BASE64.decode(request.pdf_base64.trim())?;
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain());

        let email = Message::builder()
            .message_id(Some(message_id.clone()))
            .from(self.from.clone())
            .to(to)
            .subject(request.subject.as_str())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::html(request.html_content.clone()))
                    .singlepart(
                        Attachment::new(filename.to_string())
                            .body(document, attachment_content_type(filename)),
                    ),
            )?;

        match &self.transport {
            Transport::Smtp(mailer) => {
                mailer.send(email).await?;
            }
            Transport::Stub(stub) => stub.send(email).await?,
        }

        tracing::info!(
            to = %request.to,
            message_id = %message_id,
            attachment = %filename,
            "Budget report sent"
        );
        Ok(message_id)
    }
}

fn sender(name: &str, address: &str) -> Result<Mailbox, EmailError> {
    let address = address
        .parse::<Address>()
        .map_err(|_| EmailError::InvalidAddress(address.to_string()))?;
    Ok(Mailbox::new(Some(name.to_string()), address))
}

fn recipient(name: &str, address: &str) -> Result<Mailbox, EmailError> {
    let email =
        Email::parse(address).map_err(|_| EmailError::InvalidAddress(address.trim().to_string()))?;
    let address = email
        .as_str()
        .parse::<Address>()
        .map_err(|_| EmailError::InvalidAddress(email.to_string()))?;
    Ok(Mailbox::new(Some(name.to_string()), address))
}

/// Content type for an attachment, from its file extension.
#[must_use]
pub fn attachment_content_type(filename: &str) -> ContentType {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => ContentType::parse("application/pdf"),
        "html" | "htm" => ContentType::parse("text/html; charset=utf-8"),
        _ => ContentType::parse("application/octet-stream"),
    }
    .unwrap_or(ContentType::TEXT_PLAIN)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> SendEmailRequest {
        SendEmailRequest {
            to: "farmer@example.com".to_string(),
            recipient_name: Some("Farmer (+254700123456)".to_string()),
            subject: "Your Poultry Budget Report - River Poultry & SmartVet".to_string(),
            html_content: "<p>Dear Farmer</p>".to_string(),
            pdf_base64: BASE64.encode(b"<html>report</html>"),
            pdf_filename: Some("Poultry_Budget_Report.html".to_string()),
        }
    }

    fn service() -> EmailService {
        EmailService::in_memory("River Poultry & SmartVet", "reports@riverpoultry.com").unwrap()
    }

    #[test]
    fn test_attachment_content_type() {
        assert_eq!(
            attachment_content_type("report.PDF"),
            ContentType::parse("application/pdf").unwrap()
        );
        assert_eq!(
            attachment_content_type("Poultry_Budget_Report.html"),
            ContentType::parse("text/html; charset=utf-8").unwrap()
        );
        assert_eq!(
            attachment_content_type("report"),
            ContentType::parse("application/octet-stream").unwrap()
        );
    }

    #[tokio::test]
    async fn test_send_report_returns_message_id() {
        let id = service().send_report(&request()).await.unwrap();
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@riverpoultry.com>"));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_client_error() {
        let mut request = request();
        request.to = "not-an-address".to_string();
        let err = service().send_report(&request).await.unwrap_err();
        assert!(matches!(err, EmailError::InvalidAddress(_)));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_invalid_base64_is_client_error() {
        let mut request = request();
        request.pdf_base64 = "***".to_string();
        let err = service().send_report(&request).await.unwrap_err();
        assert!(matches!(err, EmailError::InvalidAttachment(_)));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_in_memory_connection_ok() {
        assert!(service().test_connection().await.unwrap());
    }

    #[test]
    fn test_invalid_sender_rejected() {
        assert!(EmailService::in_memory("x", "nobody").is_err());
    }
}
