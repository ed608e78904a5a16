//! Canned reports: best-selling products and low-stock products.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::order::Order;
use crate::models::product::{Product, StockBucket};

/// Query parameters for the best-sellers report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BestSellersQuery {
    pub limit: Option<usize>,
}

impl BestSellersQuery {
    const DEFAULT_LIMIT: usize = 10;
    const MAX_LIMIT: usize = 100;

    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

/// Units sold and revenue for one product across all orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSeller {
    pub product_ref: String,
    pub name: Option<String>,
    pub quantity_sold: f64,
    pub revenue: f64,
    pub order_count: u64,
}

/// A product at or below the low-stock line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub stock: f64,
    pub bucket: StockBucket,
}

/// Rank products by units sold, highest first; ties broken by reference.
pub fn best_sellers(orders: &[Order], limit: usize) -> Vec<BestSeller> {
    let mut by_product: HashMap<String, BestSeller> = HashMap::new();

    for order in orders {
        for item in order.line_items() {
            let key = item
                .product_ref
                .clone()
                .or_else(|| item.name.clone())
                .unwrap_or_else(|| "unknown".to_string());

            let entry = by_product.entry(key.clone()).or_insert_with(|| BestSeller {
                product_ref: key,
                name: None,
                quantity_sold: 0.0,
                revenue: 0.0,
                order_count: 0,
            });
            if entry.name.is_none() {
                entry.name = item.name.clone();
            }
            entry.quantity_sold += item.quantity;
            entry.revenue += item.quantity * item.unit_price;
            entry.order_count += 1;
        }
    }

    let mut ranked: Vec<BestSeller> = by_product.into_values().collect();
    ranked.sort_by(|a, b| {
        b.quantity_sold
            .total_cmp(&a.quantity_sold)
            .then_with(|| a.product_ref.cmp(&b.product_ref))
    });
    ranked.truncate(limit);
    ranked
}

/// Negative, out-of-stock and low products, lowest stock first.
pub fn low_stock(products: &[Product]) -> Vec<LowStockItem> {
    let mut items: Vec<LowStockItem> = products
        .iter()
        .filter(|p| p.bucket() != StockBucket::Normal)
        .map(|p| LowStockItem {
            id: p.id(),
            name: p.name(),
            sku: p.sku(),
            stock: p.stock(),
            bucket: p.bucket(),
        })
        .collect();

    items.sort_by(|a, b| a.stock.total_cmp(&b.stock).then_with(|| a.name.cmp(&b.name)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Record;
    use crate::services::mock_data;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(BestSellersQuery::default().limit(), 10);
        assert_eq!(BestSellersQuery { limit: Some(0) }.limit(), 1);
        assert_eq!(BestSellersQuery { limit: Some(1000) }.limit(), 100);
    }

    #[test]
    fn best_sellers_rank_mock_orders() {
        let set = mock_data::generate(&Utc::now());
        let ranked = best_sellers(&set.orders, 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].product_ref, "TS-001");
        assert_eq!(ranked[0].quantity_sold, 6.0);
        assert_eq!(ranked[0].revenue, 1740.0);
        assert_eq!(ranked[0].order_count, 2);
        assert_eq!(ranked[1].product_ref, "NB-009");
        assert_eq!(ranked[2].product_ref, "WB-004");
    }

    #[test]
    fn ties_break_by_reference() {
        let orders: Vec<Order> = vec![json!({
            "list": [
                { "sku": "B", "number": 1, "pricepernumber": 1 },
                { "sku": "A", "number": 1, "pricepernumber": 1 }
            ]
        })]
        .into_iter()
        .map(|v| Order::from(Record::new(v)))
        .collect();
        let ranked = best_sellers(&orders, 10);
        assert_eq!(ranked[0].product_ref, "A");
        assert_eq!(ranked[1].product_ref, "B");
    }

    #[test]
    fn items_without_reference_group_by_name() {
        let orders: Vec<Order> = vec![
            json!({ "items": [{ "name": "Gift wrap", "qty": 1, "price": 20 }] }),
            json!({ "items": [{ "name": "Gift wrap", "qty": 2, "price": 20 }] }),
        ]
        .into_iter()
        .map(|v| Order::from(Record::new(v)))
        .collect();
        let ranked = best_sellers(&orders, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].product_ref, "Gift wrap");
        assert_eq!(ranked[0].quantity_sold, 3.0);
        assert_eq!(ranked[0].revenue, 60.0);
    }

    #[test]
    fn low_stock_orders_by_stock() {
        let set = mock_data::generate(&Utc::now());
        let items = low_stock(&set.products);
        let skus: Vec<_> = items.iter().filter_map(|i| i.sku.as_deref()).collect();
        assert_eq!(skus, vec!["PS-007", "MG-003", "CH-005", "TB-002", "EC-008"]);
        assert_eq!(items[0].bucket, StockBucket::Negative);
        assert_eq!(items[1].bucket, StockBucket::OutOfStock);
        assert!(items[2..].iter().all(|i| i.bucket == StockBucket::Low));
    }
}
