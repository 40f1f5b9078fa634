use axum::Json;
use serde::Serialize;

use crate::analytics::LeadAnalytics;

pub struct AppState {
    pub analytics: LeadAnalytics,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
