use crate::models::{Lead, NewLead};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Initialize the storage (create tables and indexes)
    async fn init(&self) -> Result<()>;

    /// Persist a newly captured lead and return the stored record
    async fn insert_lead(&self, lead: &NewLead) -> Result<Lead>;

    /// Read every lead, oldest first (ordered by `created_at`, then `id`)
    async fn list_leads(&self) -> Result<Vec<Lead>>;

    /// Count all leads regardless of creation time
    async fn count_leads(&self) -> Result<i64>;
}

pub(crate) fn now_unix() -> Result<i64> {
    Ok(std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs() as i64)
}
