//! Lead tracking.
//!
//! Every report download, email request, calendar export or house-space
//! calculation records who asked for it. Leads are kept in the local store (the most recent
//! [`MAX_STORED_LEADS`]) and, when a tracking endpoint is configured, posted
//! to it. Remote failures are logged and never reach the caller.

use chrono::{DateTime, Duration, Utc};
use river_poultry_core::{BudgetBreakdown, ContactInfo, HouseSpace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::relay_client::user_agent;
use crate::store::{FileStore, LEADS_KEY, StoreError};

/// How many leads the local store keeps.
pub const MAX_STORED_LEADS: usize = 100;

/// Which tool produced the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolName {
    Vaccination,
    RoomMeasurement,
    BudgetCalculator,
}

impl ToolName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vaccination => "vaccination",
            Self::RoomMeasurement => "roomMeasurement",
            Self::BudgetCalculator => "budgetCalculator",
        }
    }
}

/// What the farmer asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadAction {
    PdfDownload,
    EmailRequest,
    CalendarExport,
    Calculation,
}

impl LeadAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PdfDownload => "pdf_download",
            Self::EmailRequest => "email_request",
            Self::CalendarExport => "calendar_export",
            Self::Calculation => "calculation",
        }
    }
}

/// Tool-specific figures attached to a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poultry_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccine_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bird_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_birds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_period: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_costs: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_profit: Option<Decimal>,
    /// House floor area in m².
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_area: Option<Decimal>,
}

impl ToolData {
    /// Budget figures for a calculator lead.
    #[must_use]
    pub fn budget(breakdown: &BudgetBreakdown) -> Self {
        Self {
            bird_type: Some(breakdown.parameters.bird_type.as_str().to_string()),
            num_birds: Some(breakdown.parameters.bird_count),
            production_period: Some(breakdown.parameters.production_period),
            total_costs: Some(breakdown.result.total_costs),
            net_profit: Some(breakdown.result.net_profit),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn house_space(space: &HouseSpace) -> Self {
        Self {
            bird_type: Some(space.bird_type.as_str().to_string()),
            num_birds: Some(space.bird_count),
            floor_area: Some(space.area),
            ..Self::default()
        }
    }
}

/// One recorded lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLead {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub tool_name: ToolName,
    pub action: LeadAction,
    pub contact_info: ContactInfo,
    pub tool_data: ToolData,
    pub session_id: String,
    pub user_agent: String,
}

impl UserLead {
    /// `countryCode + phone`, or empty.
    #[must_use]
    pub fn phone(&self) -> String {
        self.contact_info.full_phone().unwrap_or_default()
    }
}

/// Counts over the stored leads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadStats {
    pub total: usize,
    pub budget_calculator: usize,
    pub vaccination: usize,
    pub room_measurement: usize,
    pub pdf_download: usize,
    pub email_request: usize,
    pub calendar_export: usize,
    pub with_email: usize,
    pub with_phone: usize,
    pub last_24_hours: usize,
}

/// Records leads locally and forwards them to the tracking endpoint.
///
/// Construct one per process; its session id ties together every lead the
/// process records.
#[derive(Debug, Clone)]
pub struct LeadTracker {
    store: FileStore,
    client: reqwest::Client,
    endpoint: Option<Url>,
    session_id: String,
}

impl LeadTracker {
    #[must_use]
    pub fn new(store: FileStore, client: reqwest::Client, endpoint: Option<Url>) -> Self {
        Self {
            store,
            client,
            endpoint,
            session_id: format!("session_{}_{}", Utc::now().timestamp_millis(), short_id()),
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Record a lead.
    ///
    /// The lead is stored locally first; the upload is best effort.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only if the local write fails.
    pub async fn track(
        &self,
        tool_name: ToolName,
        action: LeadAction,
        contact_info: &ContactInfo,
        tool_data: ToolData,
    ) -> Result<UserLead, StoreError> {
        let now = Utc::now();
        let lead = UserLead {
            id: format!("lead_{}_{}", now.timestamp_millis(), short_id()),
            timestamp: now,
            tool_name,
            action,
            contact_info: contact_info.clone(),
            tool_data,
            session_id: self.session_id.clone(),
            user_agent: user_agent(),
        };

        let mut leads = self.stored();
        leads.push(lead.clone());
        let excess = leads.len().saturating_sub(MAX_STORED_LEADS);
        leads.drain(..excess);
        self.store.set(LEADS_KEY, &leads)?;

        self.upload(&lead).await;
        tracing::info!(lead_id = %lead.id, action = action.as_str(), "Lead tracked");
        Ok(lead)
    }

    /// Locally stored leads, oldest first. Unreadable data reads as empty.
    #[must_use]
    pub fn stored(&self) -> Vec<UserLead> {
        self.store
            .get::<Vec<UserLead>>(LEADS_KEY)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored leads are unreadable");
                None
            })
            .unwrap_or_default()
    }

    /// Stored leads as CSV, every cell quoted.
    #[must_use]
    pub fn export_csv(&self) -> String {
        leads_to_csv(&self.stored())
    }

    #[must_use]
    pub fn stats(&self, now: DateTime<Utc>) -> LeadStats {
        lead_stats(&self.stored(), now)
    }

    async fn upload(&self, lead: &UserLead) {
        let Some(endpoint) = &self.endpoint else {
            return;
        };
        match self.client.post(endpoint.clone()).json(lead).send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Lead endpoint rejected lead, kept locally");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Lead endpoint unavailable, kept locally");
            }
        }
    }
}

const CSV_HEADERS: [&str; 11] = [
    "Timestamp",
    "Tool",
    "Action",
    "Email",
    "Phone",
    "Poultry Type",
    "Bird Type",
    "Number of Birds",
    "Total Costs",
    "Net Profit",
    "User Agent",
];

/// Render leads as CSV. An empty list gives a short notice instead.
#[must_use]
pub fn leads_to_csv(leads: &[UserLead]) -> String {
    if leads.is_empty() {
        return "No leads to export".to_string();
    }

    let mut lines = vec![CSV_HEADERS.join(",")];
    for lead in leads {
        let data = &lead.tool_data;
        let cells = [
            lead.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            lead.tool_name.as_str().to_string(),
            lead.action.as_str().to_string(),
            lead.contact_info.email.trim().to_string(),
            lead.phone(),
            data.poultry_type.clone().unwrap_or_default(),
            data.bird_type.clone().unwrap_or_default(),
            data.num_birds.map(|n| n.to_string()).unwrap_or_default(),
            data.total_costs.map(|d| d.to_string()).unwrap_or_default(),
            data.net_profit.map(|d| d.to_string()).unwrap_or_default(),
            lead.user_agent.clone(),
        ];
        let quoted: Vec<String> = cells
            .iter()
            .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
            .collect();
        lines.push(quoted.join(","));
    }
    lines.join("\n")
}

#[must_use]
pub fn lead_stats(leads: &[UserLead], now: DateTime<Utc>) -> LeadStats {
    let count = |pred: &dyn Fn(&UserLead) -> bool| leads.iter().filter(|l| pred(l)).count();
    LeadStats {
        total: leads.len(),
        budget_calculator: count(&|l| l.tool_name == ToolName::BudgetCalculator),
        vaccination: count(&|l| l.tool_name == ToolName::Vaccination),
        room_measurement: count(&|l| l.tool_name == ToolName::RoomMeasurement),
        pdf_download: count(&|l| l.action == LeadAction::PdfDownload),
        email_request: count(&|l| l.action == LeadAction::EmailRequest),
        calendar_export: count(&|l| l.action == LeadAction::CalendarExport),
        with_email: count(&|l| l.contact_info.has_email()),
        with_phone: count(&|l| l.contact_info.full_phone().is_some()),
        last_24_hours: count(&|l| now - l.timestamp < Duration::hours(24)),
    }
}

fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(9);
    id
}
