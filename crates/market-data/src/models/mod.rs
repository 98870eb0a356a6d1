//! Canonical market data shapes shared by every provider.

mod asset;
mod history;
mod search;

pub use asset::{AssetSnapshot, AssetType};
pub use history::{
    HistoricalPoint, HistoricalSeries, HistoryRange, StockPeriod, MAX_CRYPTO_DAYS,
    MIN_CRYPTO_DAYS,
};
pub use search::SearchResult;

/// Longest symbol accepted anywhere in the system.
pub const MAX_SYMBOL_LEN: usize = 20;

/// Trims and upper-cases a ticker so "aapl " and "AAPL" refer to the same asset.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
