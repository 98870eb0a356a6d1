use std::sync::Arc;

use log::{debug, info};
use pricewatch_market_data::{
    normalize_symbol, AssetDataProvider, AssetSnapshot, AssetType, HistoricalSeries,
    HistoryRange, SearchResult, StockPeriod, MAX_CRYPTO_DAYS, MIN_CRYPTO_DAYS,
};

use super::assets_model::SearchScope;
use super::assets_traits::AssetQueryServiceTrait;
use crate::cache::{history_key, snapshot_key, CachedValue, MarketCache};
use crate::constants::{HISTORY_CACHE_TTL, SNAPSHOT_CACHE_TTL};
use crate::errors::{Error, Result, ValidationError};

/// Read-through cache in front of the stock and crypto providers.
///
/// Only successful lookups are cached; a miss that the provider cannot
/// satisfy is returned as `NotFound` and retried against the provider on the
/// next call.
pub struct AssetQueryService {
    stock_provider: Arc<dyn AssetDataProvider>,
    crypto_provider: Arc<dyn AssetDataProvider>,
    cache: Arc<MarketCache>,
}

impl AssetQueryService {
    pub fn new(
        stock_provider: Arc<dyn AssetDataProvider>,
        crypto_provider: Arc<dyn AssetDataProvider>,
        cache: Arc<MarketCache>,
    ) -> Self {
        AssetQueryService {
            stock_provider,
            crypto_provider,
            cache,
        }
    }

    fn provider_for(&self, asset_type: AssetType) -> &dyn AssetDataProvider {
        match asset_type {
            AssetType::Stock => self.stock_provider.as_ref(),
            AssetType::Crypto => self.crypto_provider.as_ref(),
        }
    }

    fn validate_query(query: &str) -> Result<&str> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::MissingField("query".to_string()).into());
        }
        Ok(query)
    }
}

#[async_trait::async_trait]
impl AssetQueryServiceTrait for AssetQueryService {
    async fn get_snapshot(
        &self,
        asset_type: AssetType,
        symbol: &str,
    ) -> Result<Arc<AssetSnapshot>> {
        let symbol = normalize_symbol(symbol);
        let key = snapshot_key(asset_type, &symbol);

        if let Some(CachedValue::Snapshot(snapshot)) = self.cache.get(&key) {
            debug!("Cache hit for {}", key);
            return Ok(snapshot);
        }

        let snapshot = self
            .provider_for(asset_type)
            .fetch_snapshot(&symbol)
            .await
            .map(Arc::new)
            .ok_or_else(|| {
                Error::NotFound(format!("{} {} not found", asset_type.label(), symbol))
            })?;

        self.cache.set(
            key,
            CachedValue::Snapshot(snapshot.clone()),
            Some(SNAPSHOT_CACHE_TTL),
        );
        Ok(snapshot)
    }

    async fn get_history(
        &self,
        asset_type: AssetType,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<Arc<HistoricalSeries>> {
        let symbol = normalize_symbol(symbol);
        let key = history_key(asset_type, &symbol, &range);

        if let Some(CachedValue::History(series)) = self.cache.get(&key) {
            debug!("Cache hit for {}", key);
            return Ok(series);
        }

        let data = self
            .provider_for(asset_type)
            .fetch_history(&symbol, &range)
            .await;
        if data.is_empty() {
            return Err(Error::NotFound(format!(
                "No historical data found for {}",
                symbol
            )));
        }

        let series = Arc::new(HistoricalSeries {
            symbol,
            asset_type,
            data,
        });
        self.cache.set(
            key,
            CachedValue::History(series.clone()),
            Some(HISTORY_CACHE_TTL),
        );
        Ok(series)
    }

    async fn get_stock(&self, symbol: &str) -> Result<Arc<AssetSnapshot>> {
        self.get_snapshot(AssetType::Stock, symbol).await
    }

    async fn get_stock_history(
        &self,
        symbol: &str,
        period: &str,
    ) -> Result<Arc<HistoricalSeries>> {
        let period = StockPeriod::parse_lenient(period);
        self.get_history(AssetType::Stock, symbol, HistoryRange::Period(period))
            .await
    }

    async fn get_crypto(&self, symbol: &str) -> Result<Arc<AssetSnapshot>> {
        self.get_snapshot(AssetType::Crypto, symbol).await
    }

    async fn get_crypto_history(&self, symbol: &str, days: i64) -> Result<Arc<HistoricalSeries>> {
        let days = u16::try_from(days)
            .ok()
            .filter(|d| (MIN_CRYPTO_DAYS..=MAX_CRYPTO_DAYS).contains(d))
            .ok_or(ValidationError::OutOfRange {
                field: "days".to_string(),
                min: MIN_CRYPTO_DAYS.into(),
                max: MAX_CRYPTO_DAYS.into(),
                value: days,
            })?;
        self.get_history(AssetType::Crypto, symbol, HistoryRange::Days(days))
            .await
    }

    async fn search(&self, query: &str, scope: SearchScope) -> Result<Vec<SearchResult>> {
        let query = Self::validate_query(query)?;

        let stock = async {
            if scope.includes(AssetType::Stock) {
                self.stock_provider.search(query).await
            } else {
                Vec::new()
            }
        };
        let crypto = async {
            if scope.includes(AssetType::Crypto) {
                self.crypto_provider.search(query).await
            } else {
                Vec::new()
            }
        };
        let (mut results, crypto_results) = futures::join!(stock, crypto);
        results.extend(crypto_results);

        info!(
            "Search '{}' ({}) returned {} results",
            query,
            scope,
            results.len()
        );
        Ok(results)
    }
}
