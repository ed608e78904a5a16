//! Listing routes for products and orders.

use axum::{extract::State, Json};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::routes::extract::ApiQuery;
use crate::models::order::Order;
use crate::models::pagination::Pagination;
use crate::models::product::Product;
use crate::services::catalog::DateRange;
use crate::AppState;

/// Optional date filter for the orders listing (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilters {
    pub startdate: Option<String>,
    pub enddate: Option<String>,
}

impl OrderFilters {
    pub fn date_range(&self) -> Result<DateRange, AppError> {
        let start = parse_date("startdate", self.startdate.as_deref())?;
        let end = parse_date("enddate", self.enddate.as_deref())?;

        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(AppError::Validation(
                    "startdate must not be after enddate".to_string(),
                ));
            }
        }
        Ok(DateRange { start, end })
    }
}

fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{field} must be a YYYY-MM-DD date"))),
    }
}

/// GET /api/products — one page of products, demo data when upstream has none.
pub async fn products(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Json<ApiResponse<Vec<Product>>> {
    let listing = state.catalog.list_products(&pagination, &Local::now()).await;
    let note = listing.note();
    ApiResponse::listing(listing.items, listing.total, note)
}

/// GET /api/orders — one page of orders, optionally restricted to a date range.
pub async fn orders(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
    ApiQuery(filters): ApiQuery<OrderFilters>,
) -> Result<Json<ApiResponse<Vec<Order>>>, AppError> {
    let range = filters.date_range()?;
    let listing = state
        .catalog
        .list_orders(&pagination, range, &Local::now())
        .await;
    let note = listing.note();
    Ok(ApiResponse::listing(listing.items, listing.total, note))
}
