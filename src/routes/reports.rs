//! Report routes.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;

use crate::errors::{ApiResponse, AppError};
use crate::routes::extract::ApiQuery;
use crate::services::catalog::MOCK_DATA_NOTE;
use crate::services::reports::{self, BestSeller, BestSellersQuery, LowStockItem};
use crate::AppState;

/// GET /api/reports/best-sellers — products ranked by units sold.
pub async fn best_sellers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BestSellersQuery>,
) -> Json<ApiResponse<Vec<BestSeller>>> {
    let orders = state.catalog.report_orders(&Local::now()).await;
    let ranked = reports::best_sellers(&orders.data.items, query.limit());
    let note = orders.is_mock().then(|| MOCK_DATA_NOTE.to_string());
    let total = ranked.len() as u64;
    ApiResponse::listing(ranked, total, note)
}

/// GET /api/reports/low-stock — negative, out-of-stock and low products.
pub async fn low_stock(State(state): State<AppState>) -> Json<ApiResponse<Vec<LowStockItem>>> {
    let products = state.catalog.report_products(&Local::now()).await;
    let items = reports::low_stock(&products.data.items);
    let note = products.is_mock().then(|| MOCK_DATA_NOTE.to_string());
    let total = items.len() as u64;
    ApiResponse::listing(items, total, note)
}

/// GET /api/reports/:name — any report that does not exist.
pub async fn unknown(Path(name): Path<String>) -> AppError {
    AppError::NotFound(format!("Report '{name}' not found"))
}
