//! Serialized shape of the dashboard analytics payload

use serde::Serialize;

use crate::analytics::period::Period;

/// One entry of a grouping dimension (source, customer type, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub key: String,
    pub count: u64,
}

/// Lead count for one day of the current period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
}

/// Display projection of a lead for the "recent leads" table.
///
/// Never carries the phone number or free-text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentLead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub source: String,
    pub location: String,
    pub project_type: String,
    pub customer_type: String,
    /// RFC 3339, UTC
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub period: Period,
    pub total_leads: u64,
    pub previous_period_leads: u64,
    pub trend_percentage: i64,
    pub all_time_leads: u64,
    pub by_source: Vec<BucketCount>,
    pub by_customer_type: Vec<BucketCount>,
    pub by_project_type: Vec<BucketCount>,
    pub by_location: Vec<BucketCount>,
    pub daily_breakdown: Vec<DailyCount>,
    pub recent_leads: Vec<RecentLead>,
}
