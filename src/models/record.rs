//! Schemaless upstream records and first-present-wins field resolution.
//!
//! The commerce API is inconsistent about field names (`total` vs
//! `grandtotal`, `quantity` vs `stock`, ...). Each logical attribute is
//! resolved from an ordered list of candidate keys; the first key holding a
//! usable value wins. `null`, missing keys, blank strings and values of the
//! wrong shape are skipped, while a numeric zero counts as present.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One JSON record as received from upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
    }

    /// First candidate carrying any value at all.
    pub fn first_present(&self, candidates: &[&str]) -> Option<&Value> {
        candidates.iter().find_map(|key| self.field(key))
    }

    /// First candidate holding a number or a numeric string.
    pub fn first_number(&self, candidates: &[&str]) -> Option<f64> {
        candidates
            .iter()
            .find_map(|key| self.field(key).and_then(as_number))
    }

    /// First candidate holding a non-empty string (numbers are rendered).
    pub fn first_string(&self, candidates: &[&str]) -> Option<String> {
        candidates.iter().find_map(|key| match self.field(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// First candidate holding an array.
    pub fn first_array(&self, candidates: &[&str]) -> Option<&[Value]> {
        candidates
            .iter()
            .find_map(|key| self.field(key).and_then(Value::as_array))
            .map(Vec::as_slice)
    }

    /// Timestamp held by the first present candidate, in the zone of `tz`.
    ///
    /// Later candidates are not consulted when the first present one cannot
    /// be read.
    pub fn first_timestamp<Tz: TimeZone>(&self, candidates: &[&str], tz: &Tz) -> Option<DateTime<Tz>> {
        self.first_present(candidates)
            .and_then(|value| timestamp_from_value(value, tz))
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Interpret a JSON value as a finite number.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Interpret a JSON value as a timestamp: strings via [`parse_timestamp`],
/// numbers as Unix epoch milliseconds.
pub fn timestamp_from_value<Tz: TimeZone>(value: &Value, tz: &Tz) -> Option<DateTime<Tz>> {
    match value {
        Value::String(raw) => parse_timestamp(raw, tz),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(tz))
        }
        _ => None,
    }
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse an upstream timestamp.
///
/// Accepts RFC 3339, the same with a colon-less offset (`+0700`), naive
/// `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]` and bare `YYYY-MM-DD`. Naive forms are
/// interpreted in the zone of `tz`.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.with_timezone(tz));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive).earliest()
}
