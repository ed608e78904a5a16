//! Dashboard summary aggregation.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::models::order::Order;
use crate::models::product::{Product, StockBucket};
use crate::services::catalog::{DashboardData, MOCK_DATA_NOTE};
use crate::services::upstream::Resource;

/// Aggregated counters for the dashboard overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_orders: u64,
    pub today_orders: u64,
    pub today_sales: f64,
    pub total_products: u64,
    pub total_warehouses: u64,
    pub low_stock_count: u64,
    pub out_of_stock_count: u64,
    pub negative_stock_count: u64,
    pub last_update: DateTime<Utc>,
    pub used_mock_data: bool,
    pub mock_collections: Vec<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub debug: SummaryDebug,
}

/// Number of records actually aggregated per collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDebug {
    pub orders_found: usize,
    pub products_found: usize,
    pub warehouses_found: usize,
}

/// Products per stock bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockCounts {
    pub negative: u64,
    pub out_of_stock: u64,
    pub low: u64,
    pub normal: u64,
}

impl StockCounts {
    pub fn tally(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |mut counts, product| {
            match product.bucket() {
                StockBucket::Negative => counts.negative += 1,
                StockBucket::OutOfStock => counts.out_of_stock += 1,
                StockBucket::Low => counts.low += 1,
                StockBucket::Normal => counts.normal += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> u64 {
        self.negative + self.out_of_stock + self.low + self.normal
    }
}

/// Orders placed on the reference day and their summed totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DaySales {
    pub orders: u64,
    pub sales: f64,
}

impl DaySales {
    pub fn tally<Tz: TimeZone>(orders: &[Order], now: &DateTime<Tz>) -> Self {
        let today = start_of_day(now);
        orders
            .iter()
            .filter(|order| order.placed_at(now).is_some_and(|placed| placed >= today))
            .fold(Self::default(), |acc, order| Self {
                orders: acc.orders + 1,
                sales: acc.sales + order.total(),
            })
    }
}

/// Midnight at the start of `now`'s calendar day, in `now`'s zone.
///
/// An ambiguous midnight resolves to its earliest instant; a midnight skipped
/// by a DST gap resolves to `now`.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| now.timezone().from_local_datetime(&midnight).earliest())
        .unwrap_or_else(|| now.clone())
}

/// Compute the summary for `data` as of `now`.
pub fn summarize<Tz: TimeZone>(data: &DashboardData, now: &DateTime<Tz>) -> Summary {
    let day = DaySales::tally(&data.orders.data.items, now);
    let stock = StockCounts::tally(&data.products.data.items);
    let mock_collections = data.mock_collections();
    let used_mock_data = !mock_collections.is_empty();

    Summary {
        total_orders: data.orders.data.count(),
        today_orders: day.orders,
        today_sales: day.sales,
        total_products: data.products.data.count(),
        total_warehouses: data.warehouses.data.count(),
        low_stock_count: stock.low,
        out_of_stock_count: stock.out_of_stock,
        negative_stock_count: stock.negative,
        last_update: now.with_timezone(&Utc),
        used_mock_data,
        mock_collections,
        note: used_mock_data.then(|| MOCK_DATA_NOTE.to_string()),
        debug: SummaryDebug {
            orders_found: data.orders.data.items.len(),
            products_found: data.products.data.items.len(),
            warehouses_found: data.warehouses.data.items.len(),
        },
    }
}
