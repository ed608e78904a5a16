//! Unified error handling with consistent API response envelope.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            total: None,
            error: None,
            note: None,
        })
    }

    /// Wrap one page of a listing, with the collection total and an optional note.
    pub fn listing(data: T, total: u64, note: Option<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            total: Some(total),
            error: None,
            note,
        })
    }

    /// Wrap an error in the envelope.
    pub fn error(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            total: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
            note: None,
        })
    }
}

/// Failure talking to the upstream commerce API.
///
/// Every upstream call resolves to data or one of these; none of them panic
/// or escape the fallback path of the dashboard endpoints.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed upstream response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        };

        (status, ApiResponse::<()>::error(code, &message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_success() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "hello");
        assert!(json.get("error").is_none());
        assert!(json.get("total").is_none());
    }

    #[test]
    fn api_response_listing_carries_total_and_note() {
        let response = ApiResponse::listing(vec![1, 2], 40, Some("demo".to_string()));
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["total"], 40);
        assert_eq!(json["note"], "demo");
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn api_response_error() {
        let response = ApiResponse::<()>::error("NOT_FOUND", "Item not found");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Item not found");
    }

    #[test]
    fn app_error_is_not_found() {
        let err = AppError::NotFound("report".to_string());
        assert!(err.is_not_found());
        assert!(!AppError::Validation("x".to_string()).is_not_found());
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Validation("startdate must be YYYY-MM-DD".to_string());
        assert_eq!(err.to_string(), "Validation error: startdate must be YYYY-MM-DD");
    }

    #[test]
    fn upstream_error_status_display() {
        let err = UpstreamError::Status {
            status: 401,
            message: "invalid apikey".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream returned 401: invalid apikey");
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("report".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let response = AppError::Validation("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn query_rejection_is_validation() {
        use crate::models::pagination::Pagination;
        use axum::extract::Query;

        let uri: axum::http::Uri = "/api/products?page=-1".parse().unwrap();
        let rejection = Query::<Pagination>::try_from_uri(&uri).unwrap_err();
        let err = AppError::from(rejection);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
