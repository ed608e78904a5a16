//! A page of records returned by an upstream collection endpoint.

use serde::Serialize;

/// Items from one upstream collection plus the total the upstream reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub reported_total: Option<u64>,
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>, reported_total: Option<u64>) -> Self {
        Self {
            items,
            reported_total,
        }
    }

    /// Upstream-reported total when available, otherwise the number of items held.
    pub fn count(&self) -> u64 {
        match self.reported_total {
            Some(total) if total > 0 => total,
            _ => self.items.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert every item into another view type.
    pub fn map_into<U: From<T>>(self) -> Collection<U> {
        Collection {
            items: self.items.into_iter().map(U::from).collect(),
            reported_total: self.reported_total,
        }
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_prefers_reported_total() {
        let c = Collection::new(vec![1, 2, 3], Some(120));
        assert_eq!(c.count(), 120);
    }

    #[test]
    fn count_falls_back_to_len() {
        assert_eq!(Collection::new(vec![1, 2], None).count(), 2);
        assert_eq!(Collection::new(vec![1, 2], Some(0)).count(), 2);
    }

    #[test]
    fn map_into_keeps_total() {
        let c: Collection<i64> = Collection::new(vec![1i32, 2], Some(9)).map_into();
        assert_eq!(c.items, vec![1i64, 2]);
        assert_eq!(c.reported_total, Some(9));
    }
}
