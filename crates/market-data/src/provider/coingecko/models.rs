//! CoinGecko API response models.

use serde::Deserialize;

/// Response from /coins/{id}
#[derive(Debug, Deserialize)]
pub struct CoinResponse {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub market_data: Option<CoinMarketData>,
}

#[derive(Debug, Deserialize)]
pub struct LocalizedText {
    pub en: Option<String>,
}

/// Market data block of /coins/{id}. Per-currency values are objects keyed by currency.
#[derive(Debug, Deserialize)]
pub struct CoinMarketData {
    #[serde(default)]
    pub current_price: Option<UsdValue>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<UsdValue>,
    #[serde(default)]
    pub total_volume: Option<UsdValue>,
    #[serde(default)]
    pub high_24h: Option<UsdValue>,
    #[serde(default)]
    pub low_24h: Option<UsdValue>,
}

/// The USD entry of a per-currency map; other currencies are ignored.
#[derive(Debug, Deserialize, Default)]
pub struct UsdValue {
    pub usd: Option<f64>,
}

pub fn usd(value: &Option<UsdValue>) -> Option<f64> {
    value.as_ref().and_then(|v| v.usd)
}

/// Response from /coins/{id}/market_chart. Each pair is `[unix_millis, value]`.
#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<[Option<f64>; 2]>,
    #[serde(default)]
    pub total_volumes: Vec<[Option<f64>; 2]>,
}

/// Response from /search
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<SearchCoin>,
}

#[derive(Debug, Deserialize)]
pub struct SearchCoin {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub market_cap_rank: Option<u32>,
}
