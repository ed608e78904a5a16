//! Client for the upstream commerce REST API.
//!
//! Every call resolves to `Ok(Collection)` or an [`UpstreamError`]; nothing
//! here retries or panics, and credentials never reach the logs.

use std::fmt;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::UpstreamError;
use crate::models::collection::Collection;
use crate::models::pagination::Pagination;
use crate::models::record::{as_number, Record};

/// Logical upstream collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Orders,
    Products,
    Warehouses,
}

impl Resource {
    /// Fixed path below the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Orders => "/Order/GetOrders",
            Self::Products => "/Product/GetProducts",
            Self::Warehouses => "/Warehouse/GetWarehouses",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Products => "products",
            Self::Warehouses => "warehouses",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One read against an upstream collection.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub resource: Resource,
    pub pagination: Pagination,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl UpstreamRequest {
    pub fn new(resource: Resource, pagination: Pagination) -> Self {
        Self {
            resource,
            pagination,
            start_date: None,
            end_date: None,
        }
    }

    /// Restrict an orders request to a calendar date range (inclusive).
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.pagination.current_page().to_string()),
            ("limit", self.pagination.limit().to_string()),
        ];
        if let Some(start) = self.start_date {
            query.push(("startdate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            query.push(("enddate", end.format("%Y-%m-%d").to_string()));
        }
        query
    }

    /// Cache key: the resource path plus the exact query sent upstream.
    pub fn cache_key(&self) -> String {
        let query = self
            .query()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.resource.path(), query)
    }
}

struct Credentials {
    store_name: String,
    api_key: String,
    api_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("store_name", &self.store_name)
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Authenticated client for the commerce API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    credentials: std::sync::Arc<Credentials>,
}

impl UpstreamClient {
    pub fn new(config: &AppConfig) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(config.upstream_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            credentials: std::sync::Arc::new(Credentials {
                store_name: config.store_name.clone(),
                api_key: config.api_key.clone(),
                api_secret: config.api_secret.clone(),
            }),
        })
    }

    /// GET one page of a collection.
    pub async fn fetch(&self, request: &UpstreamRequest) -> Result<Collection<Record>, UpstreamError> {
        let url = format!("{}{}", self.base_url, request.resource.path());
        tracing::debug!(resource = %request.resource, url = %url, "Calling upstream API");

        let result = self.send(&url, request).await;
        match &result {
            Ok(collection) => tracing::info!(
                resource = %request.resource,
                items = collection.items.len(),
                reported_total = ?collection.reported_total,
                "Upstream call succeeded"
            ),
            Err(e) => tracing::warn!(
                resource = %request.resource,
                error = %e,
                "Upstream call failed"
            ),
        }
        result
    }

    async fn send(&self, url: &str, request: &UpstreamRequest) -> Result<Collection<Record>, UpstreamError> {
        let response = self
            .http
            .get(url)
            .header("storename", &self.credentials.store_name)
            .header("apikey", &self.credentials.api_key)
            .header("apisecret", &self.credentials.api_secret)
            .query(&request.query())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_collection(&body)
    }
}

/// Decode a collection response body.
///
/// Items live under `data` (or `list`); the total under `total` (or `count`).
pub fn parse_collection(body: &[u8]) -> Result<Collection<Record>, UpstreamError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

    let items = ["data", "list"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_array))
        .ok_or_else(|| UpstreamError::Decode("response has no data collection".to_string()))?;

    let reported_total = ["total", "count"]
        .iter()
        .find_map(|key| value.get(key).and_then(as_number))
        .filter(|n| *n >= 0.0)
        .map(|n| n as u64);

    Ok(Collection::new(
        items.iter().cloned().map(Record::new).collect(),
        reported_total,
    ))
}

fn error_message(body: &[u8]) -> String {
    let from_json = serde_json::from_slice::<Value>(body).ok().and_then(|v| {
        ["message", "resDesc", "error"]
            .iter()
            .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
    });

    from_json.unwrap_or_else(|| {
        let text = String::from_utf8_lossy(body);
        let text = text.trim();
        if text.is_empty() {
            "no error detail".to_string()
        } else {
            text.chars().take(200).collect()
        }
    })
}
