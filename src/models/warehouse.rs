//! Warehouse view over an upstream record. Only counted by the dashboard.

use serde::Serialize;

use super::record::Record;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Warehouse(Record);

impl Warehouse {
    pub fn id(&self) -> Option<String> {
        self.0.first_string(&["id", "warehouseid"])
    }

    pub fn name(&self) -> Option<String> {
        self.0.first_string(&["name", "warehousename"])
    }

    pub fn location(&self) -> Option<String> {
        self.0.first_string(&["location", "address"])
    }
}

impl From<Record> for Warehouse {
    fn from(record: Record) -> Self {
        Self(record)
    }
}
