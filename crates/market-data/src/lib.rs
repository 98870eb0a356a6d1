//! Pricewatch Market Data Crate
//!
//! This crate provides provider adapters that fetch live prices for stocks
//! and cryptocurrencies and map them onto one canonical set of shapes.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  Asset queries   |  (pricewatch-core, cached)
//! +------------------+
//!          |
//!          v
//! +---------------------+
//! |  AssetDataProvider  |  (one trait, never errors)
//! +---------------------+
//!      |           |
//!      v           v
//! +---------+ +-----------+
//! |  Yahoo  | | CoinGecko |
//! +---------+ +-----------+
//! ```
//!
//! # Core Types
//!
//! - [`AssetSnapshot`] - Current price and 24h stats for one instrument
//! - [`HistoricalSeries`] / [`HistoricalPoint`] - Price history
//! - [`SearchResult`] - Text search match
//! - [`HistoryRange`] - Stock period token or crypto day count

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{
    normalize_symbol, AssetSnapshot, AssetType, HistoricalPoint, HistoricalSeries, HistoryRange,
    SearchResult, StockPeriod, MAX_CRYPTO_DAYS, MAX_SYMBOL_LEN, MIN_CRYPTO_DAYS,
};
pub use provider::coingecko::{CoinGeckoConfig, CoinGeckoProvider};
pub use provider::yahoo::YahooProvider;
pub use provider::AssetDataProvider;
