use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A captured contact/inquiry record as stored by the lead capture funnel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Funnel tag, e.g. `contact_page` or `guide_landing`
    pub source: Option<String>,
    pub location: Option<String>,
    pub project_type: Option<String>,
    pub customer_type: Option<String>,
    pub message: Option<String>,
    /// Unix timestamp (seconds)
    pub created_at: i64,
}

/// Fields supplied when a lead is captured. `created_at` defaults to now.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub location: Option<String>,
    pub project_type: Option<String>,
    pub customer_type: Option<String>,
    pub message: Option<String>,
    pub created_at: Option<i64>,
}
