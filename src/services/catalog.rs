//! Cached upstream reads and the mock-data fallback policy.
//!
//! Only the fixed dashboard and report requests go through the response
//! cache; listing pages are passed straight to upstream.
//!
//! Fallback is decided per collection: orders, products and warehouses each
//! switch to their mock counterpart independently when their own fetch fails
//! or comes back with no records.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;

use crate::errors::UpstreamError;
use crate::models::collection::Collection;
use crate::models::order::Order;
use crate::models::pagination::Pagination;
use crate::models::product::Product;
use crate::models::record::Record;
use crate::models::warehouse::Warehouse;
use crate::services::cache::UpstreamCache;
use crate::services::mock_data::{self, MockDataSet};
use crate::services::upstream::{Resource, UpstreamClient, UpstreamRequest};

/// Note attached to responses built from demonstration data.
pub const MOCK_DATA_NOTE: &str = "Using demo data - API connection issue";

/// Where a collection handed to the aggregator came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Mock,
}

/// A collection tagged with its origin.
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub data: Collection<T>,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub fn live(data: Collection<T>) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    pub fn mock(items: Vec<T>) -> Self {
        Self {
            data: Collection::from(items),
            source: DataSource::Mock,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.source == DataSource::Mock
    }
}

/// The three collections the summary is computed from.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub orders: Sourced<Order>,
    pub products: Sourced<Product>,
    pub warehouses: Sourced<Warehouse>,
}

impl DashboardData {
    /// Collections that were replaced by mock data, in fixed order.
    pub fn mock_collections(&self) -> Vec<Resource> {
        [
            (Resource::Orders, self.orders.is_mock()),
            (Resource::Products, self.products.is_mock()),
            (Resource::Warehouses, self.warehouses.is_mock()),
        ]
        .into_iter()
        .filter_map(|(resource, mock)| mock.then_some(resource))
        .collect()
    }
}

/// One page of a listing endpoint.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub source: DataSource,
}

impl<T: Clone> Listing<T> {
    /// Live data is already paged upstream; mock data is paged here.
    fn from_sourced(sourced: Sourced<T>, pagination: &Pagination) -> Self {
        match sourced.source {
            DataSource::Live => Self {
                total: sourced.data.count(),
                items: sourced.data.items,
                source: DataSource::Live,
            },
            DataSource::Mock => Self {
                total: sourced.data.items.len() as u64,
                items: pagination.apply(&sourced.data.items).to_vec(),
                source: DataSource::Mock,
            },
        }
    }

    pub fn note(&self) -> Option<String> {
        (self.source == DataSource::Mock).then(|| MOCK_DATA_NOTE.to_string())
    }
}

/// Inclusive calendar date filter for order listings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

/// Substitute mock items when the live outcome is a failure or empty.
pub fn with_fallback<T, F>(
    resource: Resource,
    outcome: Result<Collection<Record>, UpstreamError>,
    mock: F,
) -> Sourced<T>
where
    T: From<Record>,
    F: FnOnce() -> Vec<T>,
{
    match outcome {
        Ok(collection) if !collection.is_empty() => Sourced::live(collection.map_into()),
        Ok(_) => {
            tracing::info!(resource = %resource, "Upstream returned no records, using mock data");
            Sourced::mock(mock())
        }
        Err(e) => {
            tracing::warn!(resource = %resource, error = %e, "Upstream unavailable, using mock data");
            Sourced::mock(mock())
        }
    }
}

/// Upstream access for request handlers: client plus the shared response cache.
#[derive(Debug, Clone)]
pub struct Catalog {
    client: UpstreamClient,
    cache: Arc<UpstreamCache>,
}

impl Catalog {
    pub fn new(client: UpstreamClient, cache: Arc<UpstreamCache>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &UpstreamCache {
        &self.cache
    }

    /// Serve from cache when fresh, otherwise call upstream and store the result.
    pub async fn fetch_cached(
        &self,
        request: &UpstreamRequest,
    ) -> Result<Collection<Record>, UpstreamError> {
        let key = request.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(key = %key, "Cache hit");
            return Ok(hit);
        }

        let fresh = self.client.fetch(request).await?;
        self.cache.put(key, fresh.clone());
        Ok(fresh)
    }

    /// Minimal uncached products call used to check connectivity.
    pub async fn probe(&self) -> Result<Collection<Record>, UpstreamError> {
        let request = UpstreamRequest::new(Resource::Products, Pagination::new(1, 1));
        self.client.fetch(&request).await
    }

    /// Fetch today's orders, products and warehouses concurrently.
    ///
    /// Each fetch resolves on its own; a failure never cancels the others.
    pub async fn load_dashboard<Tz>(&self, now: &DateTime<Tz>) -> DashboardData
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let today = now.date_naive();
        let orders_request = UpstreamRequest::new(Resource::Orders, Pagination::new(1, 100))
            .with_date_range(Some(today), Some(today));
        let products_request = UpstreamRequest::new(Resource::Products, Pagination::new(1, 500));
        let warehouses_request = UpstreamRequest::new(Resource::Warehouses, Pagination::new(1, 50));

        let (orders, products, warehouses) = tokio::join!(
            self.fetch_cached(&orders_request),
            self.fetch_cached(&products_request),
            self.fetch_cached(&warehouses_request),
        );

        let MockDataSet {
            products: mock_products,
            orders: mock_orders,
            warehouses: mock_warehouses,
        } = mock_data::generate(now);

        DashboardData {
            orders: with_fallback(Resource::Orders, orders, || mock_orders),
            products: with_fallback(Resource::Products, products, || mock_products),
            warehouses: with_fallback(Resource::Warehouses, warehouses, || mock_warehouses),
        }
    }

    /// One page of products. Client-chosen pages are never cached.
    pub async fn list_products<Tz>(&self, pagination: &Pagination, now: &DateTime<Tz>) -> Listing<Product>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let request = UpstreamRequest::new(Resource::Products, pagination.clone());
        let outcome = self.client.fetch(&request).await;
        let sourced = with_fallback(Resource::Products, outcome, || mock_data::generate(now).products);
        Listing::from_sourced(sourced, pagination)
    }

    /// One page of orders within `range`, uncached like product pages.
    pub async fn list_orders<Tz>(
        &self,
        pagination: &Pagination,
        range: DateRange,
        now: &DateTime<Tz>,
    ) -> Listing<Order>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let request = UpstreamRequest::new(Resource::Orders, pagination.clone())
            .with_date_range(range.start, range.end);
        let outcome = self.client.fetch(&request).await;
        let sourced = with_fallback(Resource::Orders, outcome, || {
            mock_data::generate(now)
                .orders
                .into_iter()
                .filter(|order| {
                    order
                        .placed_at(now)
                        .is_some_and(|placed| range.contains(placed.date_naive()))
                })
                .collect()
        });
        Listing::from_sourced(sourced, pagination)
    }

    /// Recent orders for reports, with fallback.
    pub async fn report_orders<Tz>(&self, now: &DateTime<Tz>) -> Sourced<Order>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let request = UpstreamRequest::new(Resource::Orders, Pagination::new(1, 100));
        let outcome = self.fetch_cached(&request).await;
        with_fallback(Resource::Orders, outcome, || mock_data::generate(now).orders)
    }

    /// Products for reports, with fallback. Shares the summary's cache entry.
    pub async fn report_products<Tz>(&self, now: &DateTime<Tz>) -> Sourced<Product>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let request = UpstreamRequest::new(Resource::Products, Pagination::new(1, 500));
        let outcome = self.fetch_cached(&request).await;
        with_fallback(Resource::Products, outcome, || mock_data::generate(now).products)
    }
}
