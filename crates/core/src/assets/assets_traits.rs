use std::sync::Arc;

use pricewatch_market_data::{
    AssetSnapshot, AssetType, HistoricalSeries, HistoryRange, SearchResult,
};

use super::assets_model::SearchScope;
use crate::errors::Result;

/// Trait defining the contract for cached asset lookups.
#[async_trait::async_trait]
pub trait AssetQueryServiceTrait: Send + Sync {
    /// Current snapshot for any asset class. `NotFound` when the provider has nothing.
    async fn get_snapshot(&self, asset_type: AssetType, symbol: &str)
        -> Result<Arc<AssetSnapshot>>;

    /// Price history for any asset class. `NotFound` when the series is empty.
    async fn get_history(
        &self,
        asset_type: AssetType,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<Arc<HistoricalSeries>>;

    async fn get_stock(&self, symbol: &str) -> Result<Arc<AssetSnapshot>>;

    /// Unknown period tokens are served as `1mo`.
    async fn get_stock_history(&self, symbol: &str, period: &str)
        -> Result<Arc<HistoricalSeries>>;

    async fn get_crypto(&self, symbol: &str) -> Result<Arc<AssetSnapshot>>;

    /// `days` outside 1..=365 is a validation error.
    async fn get_crypto_history(&self, symbol: &str, days: i64) -> Result<Arc<HistoricalSeries>>;

    /// Uncached search; stock matches come before crypto matches.
    async fn search(&self, query: &str, scope: SearchScope) -> Result<Vec<SearchResult>>;
}
