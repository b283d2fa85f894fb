//! Record types persisted by the store and served by `/api/stats`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A waitlist sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// A/B headline shown to the visitor when they signed up
    pub ab_variant: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A single tracked page load with its attribution fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub page_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a lead. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub ab_variant: Option<String>,
}

/// Insert payload for a page view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPageView {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub page_url: Option<String>,
}

/// The two append-only record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Lead,
    PageView,
}

impl RecordKind {
    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Lead => "leads",
            Self::PageView => "page_views",
        }
    }
}

/// Columns that can be grouped and counted.
///
/// Each field belongs to exactly one record kind, so a grouping can never
/// name a column of the wrong table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupField {
    AbVariant,
    Referrer,
    UtmSource,
    UtmMedium,
    UtmCampaign,
}

impl GroupField {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::AbVariant => RecordKind::Lead,
            Self::Referrer | Self::UtmSource | Self::UtmMedium | Self::UtmCampaign => {
                RecordKind::PageView
            }
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::AbVariant => "ab_variant",
            Self::Referrer => "referrer",
            Self::UtmSource => "utm_source",
            Self::UtmMedium => "utm_medium",
            Self::UtmCampaign => "utm_campaign",
        }
    }
}

/// Aggregate dashboard response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_leads: u64,
    pub total_page_views: u64,
    pub variants: BTreeMap<String, u64>,
    pub recent_leads: Vec<Lead>,
    pub recent_page_views: Vec<PageView>,
}
