//! Portfolio directory entries: MSMEs and the experts who support them.
//!
//! A listing can hold either kind of record. The variant is carried by an
//! explicit `kind` discriminant so the detail view never has to guess from
//! which fields happen to be present.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One record in a portfolio listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirectoryEntry {
    Business(Msme),
    Expert(BusinessGrowthExpert),
}

/// Enterprise size band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessSize {
    Micro,
    Small,
    Medium,
}

impl BusinessSize {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Micro => "Micro Enterprise",
            Self::Small => "Small Enterprise",
            Self::Medium => "Medium Enterprise",
        }
    }
}

/// Expert vetting status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpertStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ExpertStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending Approval",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// A micro, small or medium enterprise in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Msme {
    pub msme_code: String,
    pub business_name: String,
    pub business_type: BusinessSize,
    pub sector: String,
    pub owner_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub annual_revenue: Option<Decimal>,
    #[serde(default)]
    pub employee_count: Option<u32>,
    #[serde(default)]
    pub investment_needed: Option<Decimal>,
}

/// A business growth expert available for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessGrowthExpert {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub top_skills: String,
    #[serde(default)]
    pub status: ExpertStatus,
}

impl DirectoryEntry {
    /// Heading for the detail view.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Business(msme) => &msme.business_name,
            Self::Expert(expert) => &expert.name,
        }
    }

    /// Label/value rows for the detail view. Empty optional fields are skipped.
    #[must_use]
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        match self {
            Self::Business(msme) => {
                rows.push(("Business Name", msme.business_name.clone()));
                rows.push(("MSME Code", msme.msme_code.clone()));
                rows.push(("Owner", msme.owner_name.clone()));
                rows.push(("Business Type", msme.business_type.label().to_owned()));
                rows.push(("Sector", msme.sector.clone()));
                let location = [msme.city.as_str(), msme.state.as_str()]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                if !location.is_empty() {
                    rows.push(("Location", location));
                }
                if let Some(revenue) = msme.annual_revenue {
                    rows.push(("Annual Revenue", revenue.to_string()));
                }
                if let Some(count) = msme.employee_count {
                    rows.push(("Employees", count.to_string()));
                }
                if let Some(needed) = msme.investment_needed {
                    rows.push(("Investment Needed", needed.to_string()));
                }
            }
            Self::Expert(expert) => {
                rows.push(("Name", expert.name.clone()));
                if !expert.location.is_empty() {
                    rows.push(("Location", expert.location.clone()));
                }
                if let Some(years) = expert.years_of_experience {
                    rows.push(("Experience", format!("{years} years")));
                }
                if !expert.top_skills.is_empty() {
                    rows.push(("Top Skills", expert.top_skills.clone()));
                }
                rows.push(("Status", expert.status.label().to_owned()));
            }
        }
        rows
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminant_selects_variant() {
        let json = r#"{"kind":"expert","name":"Amina Okello","location":"Gulu","status":"approved"}"#;
        let entry: DirectoryEntry = serde_json::from_str(json).unwrap();
        assert!(matches!(entry, DirectoryEntry::Expert(_)));
        assert_eq!(entry.title(), "Amina Okello");
    }

    #[test]
    fn test_missing_discriminant_is_rejected() {
        // A record that merely has a business_name is not enough.
        let json = r#"{"business_name":"Agro Ltd","name":"Agro"}"#;
        assert!(serde_json::from_str::<DirectoryEntry>(json).is_err());
    }

    #[test]
    fn test_business_detail_rows() {
        let entry = DirectoryEntry::Business(Msme {
            msme_code: "PRUDEV2-GOPA-COHORT-007".to_owned(),
            business_name: "Kato Feeds".to_owned(),
            business_type: BusinessSize::Small,
            sector: "Agriculture".to_owned(),
            owner_name: "Joseph Kato".to_owned(),
            city: "Mbale".to_owned(),
            state: String::new(),
            annual_revenue: None,
            employee_count: Some(12),
            investment_needed: None,
        });
        let rows = entry.detail_rows();
        assert!(rows.contains(&("Business Type", "Small Enterprise".to_owned())));
        assert!(rows.contains(&("Location", "Mbale".to_owned())));
        assert!(rows.contains(&("Employees", "12".to_owned())));
        assert!(!rows.iter().any(|(label, _)| *label == "Annual Revenue"));
    }

    #[test]
    fn test_serialized_business_carries_kind() {
        let entry = DirectoryEntry::Expert(BusinessGrowthExpert {
            name: "Ruth".to_owned(),
            location: String::new(),
            years_of_experience: Some(4),
            top_skills: "Marketing".to_owned(),
            status: ExpertStatus::Pending,
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "expert");
    }
}
