//! CoinGecko cryptocurrency provider.
//!
//! This module provides market data from the public CoinGecko API:
//! - Snapshots via /coins/{id}
//! - Price history via /coins/{id}/market_chart
//! - Search via /search
//!
//! Tickers are resolved to CoinGecko coin ids through a fixed table supplied
//! at construction. Symbols outside the table are reported as not found.
//! API documentation: https://docs.coingecko.com/reference/introduction

mod models;
mod symbols;

pub use symbols::{default_symbol_ids, parse_symbol_ids};

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{
    normalize_symbol, AssetSnapshot, AssetType, HistoricalPoint, HistoryRange, SearchResult,
};
use crate::provider::{AssetDataProvider, DEFAULT_PROVIDER_TIMEOUT, MAX_SEARCH_RESULTS};

use models::{usd, CoinResponse, MarketChartResponse, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";
const VS_CURRENCY: &str = "usd";

// ============================================================================
// Configuration
// ============================================================================

/// Construction parameters for [`CoinGeckoProvider`].
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Upper-cased ticker to CoinGecko coin id.
    pub symbol_ids: HashMap<String, String>,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            symbol_ids: default_symbol_ids(),
        }
    }
}

// ============================================================================
// CoinGeckoProvider
// ============================================================================

/// Crypto provider backed by CoinGecko.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    symbol_ids: HashMap<String, String>,
}

impl CoinGeckoProvider {
    pub fn new(config: CoinGeckoConfig) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(MarketDataError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            symbol_ids: config
                .symbol_ids
                .into_iter()
                .map(|(symbol, id)| (normalize_symbol(&symbol), id))
                .collect(),
        })
    }

    /// Looks up the CoinGecko id for an upper-cased ticker.
    fn coin_id(&self, symbol: &str) -> Result<&str, MarketDataError> {
        self.symbol_ids
            .get(symbol)
            .map(String::as_str)
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }

    /// Make a GET request to the CoinGecko API and decode the JSON body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("CoinGecko request: {} with {} params", endpoint, params.len());

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(endpoint.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
    }

    async fn load_snapshot(&self, symbol: &str) -> Result<AssetSnapshot, MarketDataError> {
        let coin_id = self.coin_id(symbol)?;
        let coin: CoinResponse = self
            .fetch(
                &format!("/coins/{}", coin_id),
                &[
                    ("localization", "false"),
                    ("tickers", "false"),
                    ("community_data", "false"),
                    ("developer_data", "false"),
                ],
            )
            .await?;
        map_coin(symbol, coin)
    }

    async fn load_history(
        &self,
        symbol: &str,
        range: &HistoryRange,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        let days = match range {
            HistoryRange::Days(days) => *days,
            HistoryRange::Period(period) => {
                return Err(MarketDataError::ValidationFailed {
                    message: format!("CoinGecko history takes a day count, got '{}'", period),
                })
            }
        };
        let coin_id = self.coin_id(symbol)?;
        let days = days.to_string();
        let chart: MarketChartResponse = self
            .fetch(
                &format!("/coins/{}/market_chart", coin_id),
                &[("vs_currency", VS_CURRENCY), ("days", days.as_str())],
            )
            .await?;

        let points = join_market_chart(chart);
        if points.is_empty() {
            return Err(MarketDataError::NoData(symbol.to_string()));
        }
        Ok(points)
    }

    async fn load_search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let response: SearchResponse = self.fetch("/search", &[("query", query)]).await?;
        Ok(map_search(response))
    }
}

// ============================================================================
// AssetDataProvider Implementation
// ============================================================================

#[async_trait]
impl AssetDataProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Crypto
    }

    async fn fetch_snapshot(&self, symbol: &str) -> Option<AssetSnapshot> {
        let symbol = normalize_symbol(symbol);
        match self.load_snapshot(&symbol).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log_failure("snapshot", &symbol, &e);
                None
            }
        }
    }

    async fn fetch_history(&self, symbol: &str, range: &HistoryRange) -> Vec<HistoricalPoint> {
        let symbol = normalize_symbol(symbol);
        self.load_history(&symbol, range).await.unwrap_or_else(|e| {
            log_failure("history", &symbol, &e);
            Vec::new()
        })
    }

    async fn search(&self, query: &str) -> Vec<SearchResult> {
        self.load_search(query).await.unwrap_or_else(|e| {
            warn!("CoinGecko search for '{}' failed: {}", query, e);
            Vec::new()
        })
    }
}

// ============================================================================
// Response mapping
// ============================================================================

fn log_failure(what: &str, symbol: &str, error: &MarketDataError) {
    match error {
        MarketDataError::SymbolNotFound(_) => {
            warn!("Unknown crypto symbol {} ({} request)", symbol, what)
        }
        e => warn!("CoinGecko {} for {} failed: {}", what, symbol, e),
    }
}

fn map_coin(symbol: &str, coin: CoinResponse) -> Result<AssetSnapshot, MarketDataError> {
    let market = coin
        .market_data
        .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;
    let current_price =
        usd(&market.current_price).ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;

    let name = coin
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| symbol.to_string());

    let mut snapshot = AssetSnapshot::new(AssetType::Crypto, symbol, &name, current_price);
    snapshot.price_change_24h = market.price_change_24h;
    snapshot.price_change_percent_24h = market.price_change_percentage_24h;
    snapshot.market_cap = usd(&market.market_cap);
    snapshot.volume_24h = usd(&market.total_volume);
    snapshot.high_24h = usd(&market.high_24h);
    snapshot.low_24h = usd(&market.low_24h);
    snapshot.description = coin
        .description
        .and_then(|d| d.en)
        .filter(|d| !d.is_empty());

    Ok(snapshot)
}

/// Pairs each price with the volume sampled at the same millisecond timestamp.
fn join_market_chart(chart: MarketChartResponse) -> Vec<HistoricalPoint> {
    let volumes: HashMap<i64, f64> = chart
        .total_volumes
        .iter()
        .filter_map(|[ts, volume]| Some(((*ts)? as i64, (*volume)?)))
        .collect();

    let mut points: Vec<HistoricalPoint> = chart
        .prices
        .iter()
        .filter_map(|[ts, price]| {
            let millis = (*ts)? as i64;
            let price = (*price)?;
            let timestamp = Utc.timestamp_millis_opt(millis).single()?;
            Some(HistoricalPoint {
                timestamp,
                price,
                volume: volumes.get(&millis).copied(),
            })
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);
    points
}

fn map_search(response: SearchResponse) -> Vec<SearchResult> {
    response
        .coins
        .into_iter()
        .take(MAX_SEARCH_RESULTS)
        .map(|coin| {
            let result = SearchResult::new(
                &normalize_symbol(&coin.symbol),
                &coin.name,
                AssetType::Crypto,
            );
            match coin.market_cap_rank {
                Some(rank) => result.with_exchange(format!("Rank #{}", rank)),
                None => result,
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> CoinGeckoProvider {
        CoinGeckoProvider::new(CoinGeckoConfig::default()).unwrap()
    }

    #[test]
    fn test_map_coin() {
        let coin: CoinResponse = serde_json::from_str(
            r#"{
                "id": "bitcoin",
                "symbol": "btc",
                "name": "Bitcoin",
                "description": {"en": "The first cryptocurrency."},
                "market_data": {
                    "current_price": {"usd": 65000.5, "eur": 60000.0},
                    "price_change_24h": -120.25,
                    "price_change_percentage_24h": -0.18,
                    "market_cap": {"usd": 1280000000000},
                    "total_volume": {"usd": 31000000000},
                    "high_24h": {"usd": 66000},
                    "low_24h": {"usd": 64000}
                }
            }"#,
        )
        .unwrap();

        let snapshot = map_coin("BTC", coin).unwrap();
        assert_eq!(snapshot.asset_type, AssetType::Crypto);
        assert_eq!(snapshot.symbol, "BTC");
        assert_eq!(snapshot.name, "Bitcoin");
        assert_eq!(snapshot.current_price, Some(65000.5));
        assert_eq!(snapshot.price_change_24h, Some(-120.25));
        assert_eq!(snapshot.price_change_percent_24h, Some(-0.18));
        assert_eq!(snapshot.market_cap, Some(1280000000000.0));
        assert_eq!(snapshot.volume_24h, Some(31000000000.0));
        assert_eq!(snapshot.high_24h, Some(66000.0));
        assert_eq!(snapshot.low_24h, Some(64000.0));
        assert_eq!(
            snapshot.description.as_deref(),
            Some("The first cryptocurrency.")
        );
    }

    #[test]
    fn test_map_coin_without_usd_price() {
        let coin: CoinResponse = serde_json::from_str(
            r#"{"name": "Ghost", "market_data": {"current_price": {"eur": 1.0}}}"#,
        )
        .unwrap();
        assert!(map_coin("GHOST", coin).unwrap_err().is_not_found());

        let coin: CoinResponse = serde_json::from_str(r#"{"name": "Ghost"}"#).unwrap();
        assert!(map_coin("GHOST", coin).is_err());
    }

    #[test]
    fn test_join_market_chart() {
        let chart: MarketChartResponse = serde_json::from_str(
            r#"{
                "prices": [[1700000200000, 101.0], [1700000100000, 100.0], [1700000300000, null]],
                "total_volumes": [[1700000100000, 5000.0]]
            }"#,
        )
        .unwrap();

        let points = join_market_chart(chart);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].price, 100.0);
        assert_eq!(points[0].volume, Some(5000.0));
        assert_eq!(points[1].price, 101.0);
        assert_eq!(points[1].volume, None);
        assert!(points[0].timestamp < points[1].timestamp);
    }

    #[test]
    fn test_map_search_caps_and_labels() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"coins": [
                {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "market_cap_rank": 1},
                {"id": "wrapped-bitcoin", "symbol": "wbtc", "name": "Wrapped Bitcoin", "market_cap_rank": 17},
                {"id": "bitcoin-cash", "symbol": "bch", "name": "Bitcoin Cash", "market_cap_rank": 20},
                {"id": "bitget", "symbol": "bgb", "name": "Bitget Token", "market_cap_rank": 40},
                {"id": "bittensor", "symbol": "tao", "name": "Bittensor", "market_cap_rank": 35},
                {"id": "bitcoin-gold", "symbol": "btg", "name": "Bitcoin Gold", "market_cap_rank": null}
            ]}"#,
        )
        .unwrap();

        let results = map_search(response);
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].symbol, "BTC");
        assert_eq!(results[0].exchange.as_deref(), Some("Rank #1"));
        assert!(results.iter().all(|r| r.asset_type == AssetType::Crypto));
    }

    #[test]
    fn test_coin_id_lookup() {
        let provider = provider();
        assert_eq!(provider.coin_id("ETH").unwrap(), "ethereum");
        assert!(provider.coin_id("NOPE").unwrap_err().is_not_found());
    }

    #[test]
    fn test_custom_symbol_table_is_normalized() {
        let mut symbol_ids = HashMap::new();
        symbol_ids.insert("pepe".to_string(), "pepe".to_string());
        let provider = CoinGeckoProvider::new(CoinGeckoConfig {
            symbol_ids,
            ..CoinGeckoConfig::default()
        })
        .unwrap();
        assert_eq!(provider.coin_id("PEPE").unwrap(), "pepe");
        assert!(provider.coin_id("BTC").is_err());
    }

    #[tokio::test]
    async fn test_unknown_symbol_skips_network() {
        // Nothing listens on the discard port; unknown symbols must not reach it anyway
        let provider = CoinGeckoProvider::new(CoinGeckoConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..CoinGeckoConfig::default()
        })
        .unwrap();
        assert!(provider.fetch_snapshot("unknowncoin").await.is_none());
        assert!(provider
            .fetch_history("unknowncoin", &HistoryRange::Days(7))
            .await
            .is_empty());
    }
}
