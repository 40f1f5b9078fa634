use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("invalid period '{0}', expected one of 7d, 30d, 90d, 1y")]
    InvalidPeriod(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("lead store unavailable: {0}")]
    StoreUnavailable(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AnalyticsError::InvalidPeriod(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AnalyticsError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AnalyticsError::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Lead data is temporarily unavailable".to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
