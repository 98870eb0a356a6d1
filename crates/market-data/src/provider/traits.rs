//! Provider trait definitions.
//!
//! This module defines the `AssetDataProvider` trait that both the stock and
//! the crypto adapters implement.

use async_trait::async_trait;

use crate::models::{AssetSnapshot, AssetType, HistoricalPoint, HistoryRange, SearchResult};

/// Trait for market data providers.
///
/// Each method is infallible from the caller's point of view: any upstream
/// failure (network error, timeout, non-2xx, unmappable payload) is logged by
/// the adapter and reported as `None` or an empty vector. Callers therefore
/// treat "absent" as "not found".
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use pricewatch_market_data::provider::AssetDataProvider;
///
/// struct StaticProvider;
///
/// #[async_trait]
/// impl AssetDataProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     fn asset_type(&self) -> AssetType {
///         AssetType::Stock
///     }
///
///     // ... implement fetch methods
/// }
/// ```
#[async_trait]
pub trait AssetDataProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// The asset class this provider serves.
    fn asset_type(&self) -> AssetType;

    /// Fetch the current snapshot for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Upper-cased ticker (e.g. "AAPL", "BTC")
    ///
    /// # Returns
    ///
    /// `None` when the symbol cannot be resolved, the remote call fails, or
    /// the response lacks a usable price.
    async fn fetch_snapshot(&self, symbol: &str) -> Option<AssetSnapshot>;

    /// Fetch historical prices for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Upper-cased ticker
    /// * `range` - Period token (stocks) or day count (crypto)
    ///
    /// # Returns
    ///
    /// Points ordered by timestamp ascending. Empty on any failure.
    async fn fetch_history(&self, symbol: &str, range: &HistoryRange) -> Vec<HistoricalPoint>;

    /// Search for instruments matching free text.
    ///
    /// Returns at most five results in provider relevance order; empty on failure.
    async fn search(&self, query: &str) -> Vec<SearchResult>;
}
