use std::net::SocketAddr;

use anyhow::Context;
use mimalloc::MiMalloc;
use stockpulse::config::AppConfig;
use stockpulse::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockpulse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    if !config.api_configured() {
        tracing::warn!(
            store = %config.store_name,
            "Upstream credentials are placeholders; dashboard will serve demo data"
        );
    }

    let host: std::net::IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid BACKEND_HOST {:?}", config.host))?;
    let addr = SocketAddr::new(host, config.port);

    tracing::info!(
        host = %addr,
        store = %config.store_name,
        upstream = %config.upstream_base_url,
        cache_ttl_secs = config.cache_ttl_secs,
        "Starting StockPulse dashboard server"
    );

    let state = AppState::new(config).context("Failed to build upstream client")?;
    let app = stockpulse::routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
