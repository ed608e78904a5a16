//! Dashboard routes: summary statistics and upstream connectivity test.

use axum::{extract::State, Json};
use chrono::Local;
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::routes::health::ConfigSummary;
use crate::services::summary::{summarize, Summary};
use crate::AppState;

/// Result of a single uncached upstream call.
#[derive(Debug, Serialize)]
pub struct UpstreamProbe {
    pub ok: bool,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionTest {
    pub message: String,
    pub upstream: UpstreamProbe,
    pub config: ConfigSummary,
}

/// GET /api/summary — aggregated dashboard statistics.
///
/// Always succeeds; collections the upstream cannot supply are replaced by
/// demonstration data and flagged in the body.
pub async fn summary(State(state): State<AppState>) -> Json<ApiResponse<Summary>> {
    let now = Local::now();
    let data = state.catalog.load_dashboard(&now).await;
    let summary = summarize(&data, &now);

    tracing::info!(
        total_orders = summary.total_orders,
        today_orders = summary.today_orders,
        today_sales = summary.today_sales,
        total_products = summary.total_products,
        used_mock_data = summary.used_mock_data,
        "Summary calculated"
    );

    let note = summary.note.clone();
    let mut response = ApiResponse::success(summary);
    response.note = note;
    response
}

/// GET /api/test — probe the upstream API without touching the cache.
pub async fn test_connection(State(state): State<AppState>) -> Json<ApiResponse<ConnectionTest>> {
    let upstream = match state.catalog.probe().await {
        Ok(collection) => UpstreamProbe {
            ok: true,
            count: collection.count(),
            error: None,
        },
        Err(e) => UpstreamProbe {
            ok: false,
            count: 0,
            error: Some(e.to_string()),
        },
    };

    let ok = upstream.ok;
    let mut response = ApiResponse::success(ConnectionTest {
        message: "API test".to_string(),
        upstream,
        config: ConfigSummary::from(&state.config),
    });
    response.success = ok;
    response
}
