//! Analytics API handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::analytics::{resolve_period, AnalyticsError, AnalyticsResult, Period};

use super::handlers::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQueryParams {
    /// One of 7d, 30d, 90d, 1y (default: 30d when omitted)
    pub period: Option<String>,
}

/// Aggregated lead analytics for the dashboard
pub async fn get_lead_analytics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsQueryParams>,
) -> Result<Json<AnalyticsResult>, AnalyticsError> {
    let token = params
        .period
        .as_deref()
        .unwrap_or(Period::default().as_str());
    let (period, window) = resolve_period(token)?;

    let result = state.analytics.report_window(period, window).await?;
    Ok(Json(result))
}
