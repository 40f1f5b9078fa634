//! Lead analytics for the admin dashboard
//!
//! Leads captured by the marketing site are grouped by source, customer type,
//! project type, and location, bucketed per day, and compared against the
//! preceding period of equal length.

pub mod aggregator;
pub mod error;
pub mod models;
pub mod period;
pub mod service;

pub use aggregator::{aggregate, AggregationSettings, UNKNOWN_BUCKET};
pub use error::{AnalyticsError, ErrorResponse};
pub use models::{AnalyticsResult, BucketCount, DailyCount, RecentLead};
pub use period::{resolve_period, Period, PeriodWindow};
pub use service::{LeadAnalytics, StoreReadPolicy};
