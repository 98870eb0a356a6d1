//! Process-wide read-through cache for provider responses.

mod ttl_cache;

pub use ttl_cache::TtlCache;

use std::sync::Arc;

use pricewatch_market_data::{AssetSnapshot, AssetType, HistoricalSeries, HistoryRange};

/// Payloads stored in the market cache.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Snapshot(Arc<AssetSnapshot>),
    History(Arc<HistoricalSeries>),
}

/// The cache shared by every asset query.
pub type MarketCache = TtlCache<CachedValue>;

/// `stock:AAPL`, `crypto:BTC`
pub fn snapshot_key(asset_type: AssetType, symbol: &str) -> String {
    format!("{}:{}", asset_type.as_str(), symbol)
}

/// `stock_history:AAPL:1mo`, `crypto_history:BTC:30`
pub fn history_key(asset_type: AssetType, symbol: &str, range: &HistoryRange) -> String {
    format!("{}_history:{}:{}", asset_type.as_str(), symbol, range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricewatch_market_data::StockPeriod;

    #[test]
    fn keys_follow_prefix_scheme() {
        assert_eq!(snapshot_key(AssetType::Stock, "AAPL"), "stock:AAPL");
        assert_eq!(snapshot_key(AssetType::Crypto, "BTC"), "crypto:BTC");
        assert_eq!(
            history_key(
                AssetType::Stock,
                "AAPL",
                &HistoryRange::Period(StockPeriod::OneMonth)
            ),
            "stock_history:AAPL:1mo"
        );
        assert_eq!(
            history_key(AssetType::Crypto, "BTC", &HistoryRange::Days(30)),
            "crypto_history:BTC:30"
        );
    }
}
