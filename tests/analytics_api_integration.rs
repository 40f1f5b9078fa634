//! Integration tests for the analytics API
//!
//! These drive the full router (access guard, period parsing, store read,
//! aggregation) against an in-memory SQLite lead store.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use leadboard::analytics::{AggregationSettings, LeadAnalytics, StoreReadPolicy};
use leadboard::auth::AccessGuard;
use leadboard::models::{Lead, NewLead};
use leadboard::storage::{LeadStore, SqliteLeadStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const ADMIN_KEY: &str = "test-admin-key";
const DAY: i64 = 86_400;

/// Helper to create test storage
async fn create_test_store() -> Arc<dyn LeadStore> {
    let store = SqliteLeadStore::new("sqlite::memory:", 1).await.unwrap();
    store.init().await.unwrap();
    Arc::new(store)
}

fn create_app(store: Arc<dyn LeadStore>) -> Router {
    let analytics = LeadAnalytics::new(
        store,
        StoreReadPolicy::default(),
        AggregationSettings::default(),
    );
    let guard = Arc::new(AccessGuard::new(Some(ADMIN_KEY)));
    leadboard::api::create_api_router(analytics, guard)
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

async fn insert(store: &Arc<dyn LeadStore>, email: &str, source: Option<&str>, created_at: i64) {
    store
        .insert_lead(&NewLead {
            name: "Test Lead".to_string(),
            email: email.to_string(),
            phone: Some("555-0199".to_string()),
            source: source.map(str::to_string),
            location: Some("Phoenix".to_string()),
            project_type: Some("pergola".to_string()),
            customer_type: Some("homeowner".to_string()),
            message: Some("Please call me back".to_string()),
            created_at: Some(created_at),
        })
        .await
        .unwrap();
}

async fn get(app: Router, uri: &str, key: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header("x-admin-key", key);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_needs_no_key() {
    let app = create_app(create_test_store().await);

    let (status, json) = get(app, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "OK");
}

#[tokio::test]
async fn test_week_over_week_growth() {
    let store = create_test_store().await;
    for i in 0..3 {
        let email = format!("current{}@example.com", i);
        insert(&store, &email, Some("contact_page"), now() - DAY - i * 60).await;
    }
    insert(&store, "prev1@example.com", Some("contact_page"), now() - 8 * DAY).await;
    insert(&store, "prev2@example.com", Some("contact_page"), now() - 10 * DAY).await;
    insert(&store, "old@example.com", Some("guide_landing"), now() - 40 * DAY).await;

    let (status, json) = get(create_app(store), "/analytics?period=7d", Some(ADMIN_KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["period"], "7d");
    assert_eq!(json["totalLeads"], 3);
    assert_eq!(json["previousPeriodLeads"], 2);
    assert_eq!(json["trendPercentage"], 50);
    assert_eq!(json["allTimeLeads"], 6);
    assert_eq!(
        json["bySource"],
        serde_json::json!([{ "key": "contact_page", "count": 3 }])
    );
    assert_eq!(json["dailyBreakdown"].as_array().unwrap().len(), 7);
    assert_eq!(json["recentLeads"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_empty_store_thirty_days() {
    let (status, json) = get(
        create_app(create_test_store().await),
        "/analytics?period=30d",
        Some(ADMIN_KEY),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalLeads"], 0);
    assert_eq!(json["previousPeriodLeads"], 0);
    assert_eq!(json["trendPercentage"], 0);
    for dimension in ["bySource", "byCustomerType", "byProjectType", "byLocation"] {
        assert!(json[dimension].as_array().unwrap().is_empty());
    }

    let daily = json["dailyBreakdown"].as_array().unwrap();
    assert_eq!(daily.len(), 30);
    assert!(daily.iter().all(|d| d["count"] == 0));
}

#[tokio::test]
async fn test_blank_location_counted_as_unknown() {
    let store = create_test_store().await;
    store
        .insert_lead(&NewLead {
            name: "No Location".to_string(),
            email: "nowhere@example.com".to_string(),
            location: Some("".to_string()),
            created_at: Some(now() - 2 * DAY),
            ..NewLead::default()
        })
        .await
        .unwrap();
    insert(&store, "phx@example.com", Some("contact_page"), now() - DAY).await;

    let (status, json) = get(create_app(store), "/analytics?period=7d", Some(ADMIN_KEY)).await;

    assert_eq!(status, StatusCode::OK);
    let by_location = json["byLocation"].as_array().unwrap();
    let unknown = by_location.iter().find(|b| b["key"] == "unknown").unwrap();
    assert_eq!(unknown["count"], 1);
    let total: u64 = by_location.iter().map(|b| b["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 2);
    assert!(json["bySource"]
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["key"] == "unknown" && b["count"] == 1));
}

#[tokio::test]
async fn test_missing_key_is_unauthorized_without_data() {
    let store = create_test_store().await;
    insert(&store, "secret@example.com", Some("contact_page"), now() - DAY).await;

    let (status, json) = get(create_app(store), "/analytics?period=7d", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json.get("totalLeads").is_none());
    assert!(!json.to_string().contains("secret@example.com"));
    assert_eq!(json, serde_json::json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_wrong_key_is_unauthorized_regardless_of_period() {
    let store = create_test_store().await;
    insert(&store, "secret@example.com", Some("contact_page"), now() - DAY).await;

    for uri in ["/analytics?period=7d", "/analytics?period=bogus", "/analytics"] {
        let (status, json) = get(create_app(Arc::clone(&store)), uri, Some("wrong-key")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "uri {}", uri);
        assert_eq!(json, serde_json::json!({ "error": "Unauthorized" }));
    }
}

#[tokio::test]
async fn test_unknown_period_is_bad_request() {
    let app = create_app(create_test_store().await);

    for uri in ["/analytics?period=14d", "/analytics?period=", "/analytics?period=1Y"] {
        let (status, json) = get(app.clone(), uri, Some(ADMIN_KEY)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        assert!(json.get("totalLeads").is_none());
        assert!(json["error"].as_str().unwrap().contains("invalid period"));
    }
}

#[tokio::test]
async fn test_omitted_period_defaults_to_thirty_days() {
    let (status, json) = get(
        create_app(create_test_store().await),
        "/analytics",
        Some(ADMIN_KEY),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["period"], "30d");
    assert_eq!(json["dailyBreakdown"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn test_recent_leads_hide_contact_details() {
    let store = create_test_store().await;
    insert(&store, "visible@example.com", Some("guide_landing"), now() - 3600).await;

    let (_, json) = get(create_app(store), "/analytics?period=7d", Some(ADMIN_KEY)).await;

    let recent = &json["recentLeads"][0];
    assert_eq!(recent["email"], "visible@example.com");
    assert_eq!(recent["source"], "guide_landing");
    assert_eq!(recent["projectType"], "pergola");
    assert!(recent.get("phone").is_none());
    assert!(recent.get("message").is_none());
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let store = create_test_store().await;
    for (i, source) in ["guide_landing", "contact_page", "referral", "contact_page", "guide_landing"]
        .iter()
        .enumerate()
    {
        let created_at = now() - (i as i64 + 1) * DAY;
        insert(&store, &format!("l{}@example.com", i), Some(*source), created_at).await;
    }
    let app = create_app(store);

    let (_, first) = get(app.clone(), "/analytics?period=90d", Some(ADMIN_KEY)).await;
    let (_, second) = get(app, "/analytics?period=90d", Some(ADMIN_KEY)).await;

    assert_eq!(first["bySource"], second["bySource"]);
    assert_eq!(first["recentLeads"], second["recentLeads"]);
    assert_eq!(
        first["bySource"],
        serde_json::json!([
            { "key": "guide_landing", "count": 2 },
            { "key": "contact_page", "count": 2 },
            { "key": "referral", "count": 1 }
        ])
    );
}

/// Store whose reads always fail
struct BrokenStore;

#[async_trait]
impl LeadStore for BrokenStore {
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_lead(&self, _lead: &NewLead) -> Result<Lead> {
        Err(anyhow!("database is locked"))
    }

    async fn list_leads(&self) -> Result<Vec<Lead>> {
        Err(anyhow!("database is locked"))
    }

    async fn count_leads(&self) -> Result<i64> {
        Err(anyhow!("database is locked"))
    }
}

#[tokio::test]
async fn test_store_failure_is_service_unavailable() {
    let (status, json) = get(
        create_app(Arc::new(BrokenStore)),
        "/analytics?period=7d",
        Some(ADMIN_KEY),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json.get("totalLeads").is_none());
    assert!(!json.to_string().contains("locked"));
}

#[tokio::test]
async fn test_unconfigured_key_rejects_all_requests() {
    let analytics = LeadAnalytics::new(
        create_test_store().await,
        StoreReadPolicy::default(),
        AggregationSettings::default(),
    );
    let app = leadboard::api::create_api_router(analytics, Arc::new(AccessGuard::new(None)));

    let (status, _) = get(app.clone(), "/analytics?period=7d", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = get(app, "/analytics?period=7d", Some("")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
