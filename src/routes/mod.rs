//! Route definitions for the dashboard API.

pub mod catalog;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod reports;

use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router. Unmatched paths are served from the
/// static dashboard directory.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/test", get(dashboard::test_connection))
        .route("/summary", get(dashboard::summary))
        .route("/products", get(catalog::products))
        .route("/orders", get(catalog::orders))
        .route("/reports/best-sellers", get(reports::best_sellers))
        .route("/reports/low-stock", get(reports::low_stock))
        .route("/reports/{name}", get(reports::unknown));

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::live))
        .nest("/api", api_routes)
        .fallback_service(static_files)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
