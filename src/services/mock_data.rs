//! Demonstration data served when the upstream API has nothing usable.
//!
//! Everything is fixed except order timestamps, which are placed relative to
//! `now` so that three orders always fall on the current day and two on
//! earlier days.

use chrono::{DateTime, Duration, TimeZone};
use serde_json::json;

use crate::models::order::Order;
use crate::models::product::Product;
use crate::models::record::Record;
use crate::models::warehouse::Warehouse;

use super::summary::start_of_day;

/// One complete substitute data set.
#[derive(Debug, Clone)]
pub struct MockDataSet {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub warehouses: Vec<Warehouse>,
}

/// (id, name, sku, quantity, price)
const PRODUCTS: &[(&str, &str, &str, i64, f64)] = &[
    ("P001", "Classic Cotton T-Shirt", "TS-001", 25, 290.0),
    ("P002", "Canvas Tote Bag", "TB-002", 3, 350.0),
    ("P003", "Ceramic Coffee Mug", "MG-003", 0, 180.0),
    ("P004", "Stainless Water Bottle", "WB-004", 12, 450.0),
    ("P005", "Leather Card Holder", "CH-005", 1, 590.0),
    ("P006", "Scented Soy Candle", "CD-006", 40, 320.0),
    ("P007", "Bamboo Phone Stand", "PS-007", -2, 250.0),
    ("P008", "Earbuds Case", "EC-008", 4, 199.0),
    ("P009", "Dotted A5 Notebook", "NB-009", 60, 120.0),
    ("P010", "Desk Plant Pot", "PP-010", 8, 260.0),
];

pub fn generate<Tz: TimeZone>(now: &DateTime<Tz>) -> MockDataSet
where
    Tz::Offset: std::fmt::Display,
{
    let products = PRODUCTS
        .iter()
        .map(|(id, name, sku, quantity, price)| {
            Product::from(Record::new(json!({
                "id": id,
                "name": name,
                "sku": sku,
                "quantity": quantity,
                "sellprice": price,
            })))
        })
        .collect();

    let today = start_of_day(now);
    let earlier_today = |minutes: i64| (now.clone() - Duration::minutes(minutes)).max(today.clone());

    let orders = vec![
        json!({
            "id": "SO-1001",
            "date": earlier_today(5).to_rfc3339(),
            "grandtotal": 760.0,
            "list": [line("TS-001", "Classic Cotton T-Shirt", 2, 290.0), line("MG-003", "Ceramic Coffee Mug", 1, 180.0)],
        }),
        json!({
            "id": "SO-1002",
            "date": earlier_today(45).to_rfc3339(),
            "total": 710.0,
            "list": [line("TB-002", "Canvas Tote Bag", 1, 350.0), line("NB-009", "Dotted A5 Notebook", 3, 120.0)],
        }),
        json!({
            "id": "SO-1003",
            "createddate": earlier_today(120).to_rfc3339(),
            "totalprice": 900.0,
            "list": [line("WB-004", "Stainless Water Bottle", 2, 450.0)],
        }),
        json!({
            "id": "SO-0998",
            "date": (today.clone() - Duration::hours(3)).to_rfc3339(),
            "grandtotal": 1480.0,
            "list": [line("TS-001", "Classic Cotton T-Shirt", 4, 290.0), line("CD-006", "Scented Soy Candle", 1, 320.0)],
        }),
        json!({
            "id": "SO-0995",
            "orderdate": (today.clone() - Duration::hours(30)).to_rfc3339(),
            "total": 590.0,
            "list": [line("CH-005", "Leather Card Holder", 1, 590.0)],
        }),
    ]
    .into_iter()
    .map(|value| Order::from(Record::new(value)))
    .collect();

    let warehouses = vec![
        json!({ "id": "W01", "name": "Main Warehouse", "location": "Bangkok" }),
        json!({ "id": "W02", "name": "Overflow Storage", "location": "Chiang Mai" }),
    ]
    .into_iter()
    .map(|value| Warehouse::from(Record::new(value)))
    .collect();

    MockDataSet {
        products,
        orders,
        warehouses,
    }
}

fn line(sku: &str, name: &str, number: u32, price: f64) -> serde_json::Value {
    json!({ "sku": sku, "name": name, "number": number, "pricepernumber": price })
}
