//! Health check endpoints.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::AppConfig;
use crate::AppState;

/// Non-secret view of the upstream configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub store: String,
    pub api_configured: bool,
}

impl From<&AppConfig> for ConfigSummary {
    fn from(config: &AppConfig) -> Self {
        Self {
            store: config.store_name.clone(),
            api_configured: config.api_configured(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub config: ConfigSummary,
    pub cache_entries: usize,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// GET /health — process status and upstream configuration summary.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        config: ConfigSummary::from(&state.config),
        cache_entries: state.catalog.cache().len(),
    })
}
