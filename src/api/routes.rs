use axum::{
    http::{header, HeaderName, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::analytics::LeadAnalytics;
use crate::auth::{require_admin_key, AccessGuard, ADMIN_KEY_HEADER};

use super::analytics::get_lead_analytics;
use super::handlers::{health_check, AppState};

pub fn create_api_router(analytics: LeadAnalytics, guard: Arc<AccessGuard>) -> Router {
    let state = Arc::new(AppState { analytics });

    let protected_routes = Router::new()
        .route("/analytics", get(get_lead_analytics))
        .route_layer(middleware::from_fn_with_state(guard, require_admin_key))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(ADMIN_KEY_HEADER)]);

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(cors)
}
