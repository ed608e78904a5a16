pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use errors::UpstreamError;
use services::cache::UpstreamCache;
use services::catalog::Catalog;
use services::upstream::UpstreamClient;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub catalog: Catalog,
}

impl AppState {
    /// Build the upstream client and an empty response cache from configuration.
    pub fn new(config: config::AppConfig) -> Result<Self, UpstreamError> {
        let client = UpstreamClient::new(&config)?;
        let cache = Arc::new(UpstreamCache::new(config.cache_ttl()));
        Ok(Self {
            catalog: Catalog::new(client, cache),
            config,
        })
    }
}
