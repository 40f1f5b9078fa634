//! Request-time analytics: resolve the period, read the store, aggregate

use std::sync::Arc;
use std::time::Duration;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;
use tracing::{error, info, warn};

use crate::analytics::aggregator::{aggregate, AggregationSettings};
use crate::analytics::error::AnalyticsError;
use crate::analytics::models::AnalyticsResult;
use crate::analytics::period::{Period, PeriodWindow};
use crate::models::Lead;
use crate::storage::LeadStore;

/// How the service reads from the lead store
#[derive(Debug, Clone, Copy)]
pub struct StoreReadPolicy {
    pub timeout: Duration,
    /// Additional attempts after the first failure
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for StoreReadPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retries: 0,
            backoff: Duration::from_millis(200),
        }
    }
}

pub struct LeadAnalytics {
    store: Arc<dyn LeadStore>,
    read_policy: StoreReadPolicy,
    settings: AggregationSettings,
}

impl LeadAnalytics {
    pub fn new(
        store: Arc<dyn LeadStore>,
        read_policy: StoreReadPolicy,
        settings: AggregationSettings,
    ) -> Self {
        Self {
            store,
            read_policy,
            settings,
        }
    }

    /// Build the dashboard payload for `period`, resolved at call time
    pub async fn report(&self, period: Period) -> Result<AnalyticsResult, AnalyticsError> {
        self.report_window(period, period.resolve()).await
    }

    /// Build the dashboard payload for an already resolved window
    pub async fn report_window(
        &self,
        period: Period,
        window: PeriodWindow,
    ) -> Result<AnalyticsResult, AnalyticsError> {
        let leads = self.read_leads().await?;
        let result = aggregate(&leads, period, &window, &self.settings);

        info!(
            "Computed {} analytics: {} leads ({}% vs previous)",
            period, result.total_leads, result.trend_percentage
        );

        Ok(result)
    }

    /// Single snapshot read, bounded by the configured timeout and retried at
    /// a fixed interval. Never returns a partial snapshot.
    async fn read_leads(&self) -> Result<Vec<Lead>, AnalyticsError> {
        let store = &self.store;
        let timeout = self.read_policy.timeout;
        let retry_strategy =
            FixedInterval::new(self.read_policy.backoff).take(self.read_policy.retries as usize);

        Retry::spawn(retry_strategy, || async move {
            match tokio::time::timeout(timeout, store.list_leads()).await {
                Ok(Ok(leads)) => Ok(leads),
                Ok(Err(e)) => {
                    let failure = format!("{:#}", e);
                    warn!("Lead store read failed: {}", failure);
                    Err(failure)
                }
                Err(_) => {
                    let failure = format!("read timed out after {}ms", timeout.as_millis());
                    warn!("Lead store read failed: {}", failure);
                    Err(failure)
                }
            }
        })
        .await
        .map_err(|failure| {
            error!("Failed to read leads: {}", failure);
            AnalyticsError::StoreUnavailable(failure)
        })
    }
}
