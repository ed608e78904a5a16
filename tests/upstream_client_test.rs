//! Upstream client behavior against a fake commerce API.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockpulse::config::AppConfig;
use stockpulse::errors::UpstreamError;
use stockpulse::models::pagination::Pagination;
use stockpulse::services::upstream::{Resource, UpstreamClient, UpstreamRequest};

fn client_for(server: &MockServer, timeout_secs: &str) -> UpstreamClient {
    let vars: HashMap<&str, String> = HashMap::from([
        ("ZORT_STORE", "store-1".to_string()),
        ("ZORT_API_KEY", "key-1".to_string()),
        ("ZORT_API_SECRET", "secret-1".to_string()),
        // Trailing slash must not produce a double slash in request paths.
        ("UPSTREAM_BASE_URL", format!("{}/", server.uri())),
        ("UPSTREAM_TIMEOUT_SECS", timeout_secs.to_string()),
    ]);
    let config = AppConfig::from_source(|key| vars.get(key).cloned()).unwrap();
    UpstreamClient::new(&config).unwrap()
}

#[tokio::test]
async fn sends_auth_headers_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Order/GetOrders"))
        .and(header("storename", "store-1"))
        .and(header("apikey", "key-1"))
        .and(header("apisecret", "secret-1"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "100"))
        .and(query_param("startdate", "2026-10-19"))
        .and(query_param("enddate", "2026-10-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 1, "grandtotal": 10 }],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let day = NaiveDate::from_ymd_opt(2026, 10, 19);
    let request = UpstreamRequest::new(Resource::Orders, Pagination::new(1, 100))
        .with_date_range(day, day);
    let collection = client_for(&server, "5").fetch(&request).await.unwrap();

    assert_eq!(collection.items.len(), 1);
    assert_eq!(collection.reported_total, Some(1));
}

#[tokio::test]
async fn non_success_status_is_an_error_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "resDesc": "Store not allowed" })))
        .mount(&server)
        .await;

    let request = UpstreamRequest::new(Resource::Products, Pagination::default());
    let err = client_for(&server, "5").fetch(&request).await.unwrap_err();

    match err {
        UpstreamError::Status { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Store not allowed");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let request = UpstreamRequest::new(Resource::Warehouses, Pagination::default());
    let err = client_for(&server, "5").fetch(&request).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Decode(_)));
}

#[tokio::test]
async fn empty_collection_is_a_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [], "total": 0 })))
        .mount(&server)
        .await;

    let request = UpstreamRequest::new(Resource::Products, Pagination::default());
    let collection = client_for(&server, "5").fetch(&request).await.unwrap();
    assert!(collection.is_empty());
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [{ "id": 1 }] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let request = UpstreamRequest::new(Resource::Products, Pagination::default());
    let err = client_for(&server, "1").fetch(&request).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Timeout), "got {err:?}");
}
