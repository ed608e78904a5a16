//! Order view over an upstream record.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::record::Record;

const ID_FIELDS: &[&str] = &["id", "number", "orderid"];
const DATE_FIELDS: &[&str] = &["date", "createddate", "createdate", "orderdate"];
const TOTAL_FIELDS: &[&str] = &["grandtotal", "total", "totalprice", "amount"];
const LINE_ITEM_FIELDS: &[&str] = &["list", "items", "lineitems", "products"];

const ITEM_REF_FIELDS: &[&str] = &["sku", "productid", "product_id", "id"];
const ITEM_NAME_FIELDS: &[&str] = &["name", "productname"];
const ITEM_QUANTITY_FIELDS: &[&str] = &["number", "quantity", "qty"];
const ITEM_PRICE_FIELDS: &[&str] = &["pricepernumber", "unitprice", "price"];

/// A customer order as delivered by the commerce API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Order(Record);

/// One product line of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product_ref: Option<String>,
    pub name: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
}

impl Order {
    pub fn id(&self) -> Option<String> {
        self.0.first_string(ID_FIELDS)
    }

    /// When the order was placed.
    ///
    /// An order with no date field at all is taken as placed `now`; one whose
    /// date cannot be read yields `None`.
    pub fn placed_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match self.0.first_present(DATE_FIELDS) {
            None => Some(now.clone()),
            Some(_) => self.0.first_timestamp(DATE_FIELDS, &now.timezone()),
        }
    }

    /// Order total, 0 when absent.
    pub fn total(&self) -> f64 {
        self.0.first_number(TOTAL_FIELDS).unwrap_or(0.0)
    }

    pub fn line_items(&self) -> Vec<LineItem> {
        self.0
            .first_array(LINE_ITEM_FIELDS)
            .unwrap_or_default()
            .iter()
            .map(|value| {
                let item = Record::new(value.clone());
                LineItem {
                    product_ref: item.first_string(ITEM_REF_FIELDS),
                    name: item.first_string(ITEM_NAME_FIELDS),
                    quantity: item.first_number(ITEM_QUANTITY_FIELDS).unwrap_or(0.0),
                    unit_price: item.first_number(ITEM_PRICE_FIELDS).unwrap_or(0.0),
                }
            })
            .collect()
    }
}

impl From<Record> for Order {
    fn from(record: Record) -> Self {
        Self(record)
    }
}
