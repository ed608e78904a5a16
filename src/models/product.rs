//! Product view over an upstream record and stock classification.

use serde::Serialize;

use super::record::Record;

/// Stock strictly below this (and above zero) is "low".
pub const LOW_STOCK_THRESHOLD: f64 = 5.0;

const ID_FIELDS: &[&str] = &["id", "productid"];
const NAME_FIELDS: &[&str] = &["name", "productname"];
const SKU_FIELDS: &[&str] = &["sku", "code"];
const STOCK_FIELDS: &[&str] = &["quantity", "stock", "inventory", "available"];
const PRICE_FIELDS: &[&str] = &["sellprice", "price", "unitprice"];

/// A catalog product as delivered by the commerce API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Product(Record);

/// Mutually exclusive stock level bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockBucket {
    Negative,
    OutOfStock,
    Low,
    Normal,
}

impl StockBucket {
    pub fn classify(stock: f64) -> Self {
        if stock < 0.0 {
            Self::Negative
        } else if stock == 0.0 {
            Self::OutOfStock
        } else if stock < LOW_STOCK_THRESHOLD {
            Self::Low
        } else {
            Self::Normal
        }
    }
}

impl Product {
    pub fn id(&self) -> Option<String> {
        self.0.first_string(ID_FIELDS)
    }

    pub fn name(&self) -> Option<String> {
        self.0.first_string(NAME_FIELDS)
    }

    pub fn sku(&self) -> Option<String> {
        self.0.first_string(SKU_FIELDS)
    }

    /// On-hand quantity, 0 when absent. May be negative.
    pub fn stock(&self) -> f64 {
        self.0.first_number(STOCK_FIELDS).unwrap_or(0.0)
    }

    pub fn unit_price(&self) -> f64 {
        self.0.first_number(PRICE_FIELDS).unwrap_or(0.0)
    }

    pub fn bucket(&self) -> StockBucket {
        StockBucket::classify(self.stock())
    }
}

impl From<Record> for Product {
    fn from(record: Record) -> Self {
        Self(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(value: serde_json::Value) -> Product {
        Product::from(Record::new(value))
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(StockBucket::classify(-0.5), StockBucket::Negative);
        assert_eq!(StockBucket::classify(0.0), StockBucket::OutOfStock);
        assert_eq!(StockBucket::classify(0.5), StockBucket::Low);
        assert_eq!(StockBucket::classify(4.99), StockBucket::Low);
        assert_eq!(StockBucket::classify(5.0), StockBucket::Normal);
    }

    #[test]
    fn stock_resolves_alternate_fields() {
        assert_eq!(product(json!({ "stock": 3 })).stock(), 3.0);
        assert_eq!(product(json!({ "inventory": "-4" })).stock(), -4.0);
        assert_eq!(product(json!({ "available": 9 })).stock(), 9.0);
    }

    #[test]
    fn missing_stock_is_out_of_stock() {
        assert_eq!(product(json!({ "name": "Ghost" })).bucket(), StockBucket::OutOfStock);
    }

    #[test]
    fn accessors_read_candidates() {
        let p = product(json!({ "id": 12, "name": "Tote", "code": "TOTE-1", "price": "89" }));
        assert_eq!(p.id().as_deref(), Some("12"));
        assert_eq!(p.name().as_deref(), Some("Tote"));
        assert_eq!(p.sku().as_deref(), Some("TOTE-1"));
        assert_eq!(p.unit_price(), 89.0);
    }

    #[test]
    fn bucket_serializes_snake_case() {
        assert_eq!(serde_json::to_value(StockBucket::OutOfStock).unwrap(), "out_of_stock");
    }
}
