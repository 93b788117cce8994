//! Contact details collected before a report is downloaded or emailed.

use serde::{Deserialize, Serialize};

use super::email::{Email, EmailError};

/// Calling code preselected on a fresh form (Kenya).
pub const DEFAULT_COUNTRY_CODE: &str = "+254";

/// Calling codes offered on the contact step, as `(code, label)`.
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("+254", "Kenya (+254)"),
    ("+256", "Uganda (+256)"),
    ("+255", "Tanzania (+255)"),
    ("+250", "Rwanda (+250)"),
    ("+251", "Ethiopia (+251)"),
    ("+234", "Nigeria (+234)"),
    ("+233", "Ghana (+233)"),
    ("+27", "South Africa (+27)"),
    ("+1", "USA/Canada (+1)"),
    ("+44", "UK (+44)"),
    ("+49", "Germany (+49)"),
    ("+33", "France (+33)"),
];

/// Phone and email of the person requesting a report.
///
/// Both fields are free text as typed; nothing here is required until a
/// report action asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub country_code: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: String::new(),
            email: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_owned(),
        }
    }
}

impl ContactInfo {
    /// `countryCode + phone`, or `None` when no phone was entered.
    #[must_use]
    pub fn full_phone(&self) -> Option<String> {
        let phone = self.phone.trim();
        (!phone.is_empty()).then(|| format!("{}{phone}", self.country_code.trim()))
    }

    #[must_use]
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Downloads need at least one way to reach the farmer.
    #[must_use]
    pub fn can_download(&self) -> bool {
        self.full_phone().is_some() || self.has_email()
    }

    /// The entered address, validated.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the field is empty or malformed.
    pub fn email_address(&self) -> Result<Email, EmailError> {
        Email::parse(&self.email)
    }

    /// Name the relay puts on the `To:` header.
    #[must_use]
    pub fn recipient_name(&self) -> String {
        self.full_phone()
            .map_or_else(|| "Customer".to_owned(), |phone| format!("Farmer ({phone})"))
    }

    /// Salutation used in the email body.
    #[must_use]
    pub fn salutation(&self) -> &'static str {
        if self.full_phone().is_some() {
            "Farmer"
        } else {
            "Customer"
        }
    }

    /// One-line contact summary for the report footer.
    #[must_use]
    pub fn footer_line(&self) -> String {
        match (self.full_phone(), self.has_email()) {
            (Some(phone), true) => format!("Contact: {phone} | {}", self.email.trim()),
            (Some(phone), false) => format!("Contact: {phone}"),
            (None, true) => format!("Contact: {}", self.email.trim()),
            (None, false) => "Contact: Not provided".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(phone: &str, email: &str) -> ContactInfo {
        ContactInfo {
            phone: phone.to_owned(),
            email: email.to_owned(),
            ..ContactInfo::default()
        }
    }

    #[test]
    fn test_default_country_code() {
        assert_eq!(ContactInfo::default().country_code, "+254");
    }

    #[test]
    fn test_download_requires_phone_or_email() {
        assert!(!contact("", "").can_download());
        assert!(!contact("  ", " ").can_download());
        assert!(contact("712345678", "").can_download());
        assert!(contact("", "farmer@example.com").can_download());
    }

    #[test]
    fn test_recipient_name_and_salutation() {
        let with_phone = contact("712345678", "farmer@example.com");
        assert_eq!(with_phone.recipient_name(), "Farmer (+254712345678)");
        assert_eq!(with_phone.salutation(), "Farmer");

        let email_only = contact("", "farmer@example.com");
        assert_eq!(email_only.recipient_name(), "Customer");
        assert_eq!(email_only.salutation(), "Customer");
    }

    #[test]
    fn test_footer_line() {
        assert_eq!(
            contact("712345678", "f@example.com").footer_line(),
            "Contact: +254712345678 | f@example.com"
        );
        assert_eq!(contact("712345678", "").footer_line(), "Contact: +254712345678");
        assert_eq!(contact("", "f@example.com").footer_line(), "Contact: f@example.com");
        assert_eq!(contact("", "").footer_line(), "Contact: Not provided");
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let parsed: ContactInfo = serde_json::from_str(r#"{"phone":"700"}"#).unwrap_or_default();
        assert_eq!(parsed.phone, "700");
        assert_eq!(parsed.country_code, DEFAULT_COUNTRY_CODE);
    }
}
