//! Lead aggregation for the admin dashboard
//!
//! Everything here is a pure function of a lead snapshot and a resolved
//! period window: no I/O, no clock reads. Two calls with the same input
//! produce identical output, including the order of tied buckets.

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::analytics::models::{AnalyticsResult, BucketCount, DailyCount, RecentLead};
use crate::analytics::period::{Period, PeriodWindow};
use crate::models::Lead;

/// Bucket used for missing or blank grouping values
pub const UNKNOWN_BUCKET: &str = "unknown";

pub const DEFAULT_RECENT_LEADS: usize = 20;

/// Knobs that shape the result without changing which leads are counted
#[derive(Debug, Clone, Copy)]
pub struct AggregationSettings {
    /// Maximum number of entries in `recent_leads`
    pub recent_limit: usize,
    /// Offset used to label daily buckets with a local calendar date
    pub utc_offset: FixedOffset,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LEADS,
            utc_offset: Utc.fix(),
        }
    }
}

/// Counter that remembers the order in which keys were first seen
#[derive(Default)]
struct Tally {
    index: HashMap<String, usize>,
    buckets: Vec<BucketCount>,
}

impl Tally {
    fn add(&mut self, value: Option<&str>) {
        let key = bucket_key(value);
        match self.index.get(&key) {
            Some(&i) => self.buckets[i].count += 1,
            None => {
                self.index.insert(key.clone(), self.buckets.len());
                self.buckets.push(BucketCount { key, count: 1 });
            }
        }
    }

    /// Descending by count; `sort_by` is stable so ties keep first-seen order
    fn into_sorted(mut self) -> Vec<BucketCount> {
        self.buckets.sort_by(|a, b| b.count.cmp(&a.count));
        self.buckets
    }
}

/// Normalize a grouping value: trimmed, with missing/blank mapped to "unknown"
pub fn bucket_key(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN_BUCKET.to_string(),
    }
}

/// Signed percentage change from `previous` to `current`.
///
/// A zero baseline reports 0 when nothing happened in either window and +100
/// when leads appeared from nothing. Halves round up (-12.5 becomes -12).
pub fn trend_percentage(current: u64, previous: u64) -> i64 {
    if previous == 0 {
        return if current == 0 { 0 } else { 100 };
    }

    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    (change + 0.5).floor() as i64
}

/// Aggregate a lead snapshot over a resolved period window.
pub fn aggregate(
    leads: &[Lead],
    period: Period,
    window: &PeriodWindow,
    settings: &AggregationSettings,
) -> AnalyticsResult {
    let mut current: Vec<&Lead> = Vec::new();
    let mut previous_period_leads = 0u64;

    for lead in leads {
        if window.in_current(lead.created_at) {
            current.push(lead);
        } else if window.in_previous(lead.created_at) {
            previous_period_leads += 1;
        }
    }

    // Visit in creation order so first-seen tie-breaks ignore the store's row order
    current.sort_by_key(|lead| (lead.created_at, lead.id));

    let mut by_source = Tally::default();
    let mut by_customer_type = Tally::default();
    let mut by_project_type = Tally::default();
    let mut by_location = Tally::default();

    for lead in &current {
        by_source.add(lead.source.as_deref());
        by_customer_type.add(lead.customer_type.as_deref());
        by_project_type.add(lead.project_type.as_deref());
        by_location.add(lead.location.as_deref());
    }

    let total_leads = current.len() as u64;

    debug!(
        "Aggregated {} leads for {} (previous: {}, all time: {})",
        total_leads,
        period,
        previous_period_leads,
        leads.len()
    );

    AnalyticsResult {
        period,
        total_leads,
        previous_period_leads,
        trend_percentage: trend_percentage(total_leads, previous_period_leads),
        all_time_leads: leads.len() as u64,
        by_source: by_source.into_sorted(),
        by_customer_type: by_customer_type.into_sorted(),
        by_project_type: by_project_type.into_sorted(),
        by_location: by_location.into_sorted(),
        daily_breakdown: daily_breakdown(&current, period, window, settings.utc_offset),
        recent_leads: recent_leads(&current, settings.recent_limit),
    }
}

/// One bucket per local calendar day, ending with the local date of
/// `current_end`. Leads from the partial oldest day fall into the first bucket.
fn daily_breakdown(
    current: &[&Lead],
    period: Period,
    window: &PeriodWindow,
    utc_offset: FixedOffset,
) -> Vec<DailyCount> {
    let days = period.days();
    let today = window.current_end.with_timezone(&utc_offset).date_naive();
    let first_day = today - Duration::days(days - 1);
    let mut counts = vec![0u64; days as usize];

    for lead in current {
        let Some(created) = DateTime::from_timestamp(lead.created_at, 0) else {
            continue;
        };
        let date = created.with_timezone(&utc_offset).date_naive();
        let idx = (date - first_day).num_days().clamp(0, days - 1) as usize;
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| DailyCount {
            date: (first_day + Duration::days(i as i64))
                .format("%Y-%m-%d")
                .to_string(),
            count,
        })
        .collect()
}

fn recent_leads(current: &[&Lead], limit: usize) -> Vec<RecentLead> {
    let mut newest: Vec<&Lead> = current.to_vec();
    newest.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    newest
        .into_iter()
        .take(limit)
        .map(|lead| RecentLead {
            id: lead.id,
            name: lead.name.clone(),
            email: lead.email.clone(),
            source: bucket_key(lead.source.as_deref()),
            location: bucket_key(lead.location.as_deref()),
            project_type: bucket_key(lead.project_type.as_deref()),
            customer_type: bucket_key(lead.customer_type.as_deref()),
            created_at: DateTime::from_timestamp(lead.created_at, 0)
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_default(),
        })
        .collect()
}
