//! Provider abstractions and implementations.
//!
//! This module contains:
//! - The `AssetDataProvider` trait that both adapters implement
//! - `YahooProvider` for stocks
//! - `CoinGeckoProvider` for cryptocurrencies

mod traits;

pub mod coingecko;
pub mod yahoo;

pub use traits::AssetDataProvider;

use std::time::Duration;

/// Default per-request timeout for upstream calls.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of search results kept from a single provider.
pub const MAX_SEARCH_RESULTS: usize = 5;
