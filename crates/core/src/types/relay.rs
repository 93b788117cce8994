//! JSON bodies exchanged with the email relay.

use serde::{Deserialize, Serialize};

/// Attachment name used when the sender does not supply one.
pub const DEFAULT_ATTACHMENT_FILENAME: &str = "Poultry_Budget_Report.pdf";

/// Recipient name used when the sender does not supply one.
pub const DEFAULT_RECIPIENT_NAME: &str = "Customer";

/// `POST /api/send-email` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SendEmailRequest {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    pub subject: String,
    pub html_content: String,
    /// Base64 of the attached report document.
    pub pdf_base64: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_filename: Option<String>,
}

impl SendEmailRequest {
    /// Names of required fields that are empty, in wire spelling.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("to", &self.to),
            ("subject", &self.subject),
            ("htmlContent", &self.html_content),
            ("pdfBase64", &self.pdf_base64),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    #[must_use]
    pub fn recipient_name_or_default(&self) -> &str {
        self.recipient_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_RECIPIENT_NAME)
    }

    #[must_use]
    pub fn filename_or_default(&self) -> &str {
        self.pdf_filename
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ATTACHMENT_FILENAME)
    }
}

/// Response body for the relay's `/api/*` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl RelayResponse {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message_id: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            message: message.into(),
        }
    }
}

/// `GET /health` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
