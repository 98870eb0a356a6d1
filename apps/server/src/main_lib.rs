use std::sync::Arc;

use crate::config::Config;
use pricewatch_core::{
    assets::{AssetQueryService, AssetQueryServiceTrait},
    cache::MarketCache,
    constants::DEFAULT_CACHE_TTL,
    watchlist::{WatchlistService, WatchlistServiceTrait},
};
use pricewatch_market_data::{
    provider::coingecko::default_symbol_ids, AssetDataProvider, CoinGeckoConfig,
    CoinGeckoProvider, YahooProvider,
};
use pricewatch_storage_sqlite::{db, WatchlistRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub asset_service: Arc<dyn AssetQueryServiceTrait>,
    pub watchlist_service: Arc<dyn WatchlistServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("PW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Builds the state with the live Yahoo and CoinGecko providers.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let stock_provider = Arc::new(YahooProvider::with_timeout(config.provider_timeout)?);

    let mut symbol_ids = default_symbol_ids();
    symbol_ids.extend(config.crypto_symbols.clone());
    let crypto_provider = Arc::new(CoinGeckoProvider::new(CoinGeckoConfig {
        base_url: config.coingecko_base_url.clone(),
        timeout: config.provider_timeout,
        symbol_ids,
    })?);

    build_state_with_providers(config, stock_provider, crypto_provider).await
}

/// Builds the state around the given providers; tests inject fakes here.
pub async fn build_state_with_providers(
    config: &Config,
    stock_provider: Arc<dyn AssetDataProvider>,
    crypto_provider: Arc<dyn AssetDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let cache = Arc::new(MarketCache::with_default_ttl(DEFAULT_CACHE_TTL));
    let asset_service: Arc<dyn AssetQueryServiceTrait> = Arc::new(AssetQueryService::new(
        stock_provider,
        crypto_provider,
        cache,
    ));

    let watchlist_repository = Arc::new(WatchlistRepository::new(pool.clone(), writer));
    let watchlist_service: Arc<dyn WatchlistServiceTrait> = Arc::new(WatchlistService::new(
        watchlist_repository,
        asset_service.clone(),
    ));

    Ok(Arc::new(AppState {
        asset_service,
        watchlist_service,
        db_path,
    }))
}
