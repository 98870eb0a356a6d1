//! Yahoo Finance stock provider.
//!
//! - Snapshots come from the quoteSummary API, which needs a cookie/crumb pair
//! - History comes from the chart API via `yahoo_finance_api`
//! - Search uses the Yahoo ticker search via `yahoo_finance_api`

mod models;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::{header, Client};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{
    normalize_symbol, AssetSnapshot, AssetType, HistoricalPoint, HistoryRange, SearchResult,
};
use crate::provider::{AssetDataProvider, DEFAULT_PROVIDER_TIMEOUT, MAX_SEARCH_RESULTS};

use models::{raw, YahooQuoteSummaryResponse, YahooQuoteSummaryResult};

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
/// Daily bars, whatever the requested period.
const HISTORY_INTERVAL: &str = "1d";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Yahoo authentication data, reused until Yahoo rejects it.
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Stock provider backed by Yahoo Finance.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: Client,
    timeout: Duration,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a provider with the default 10 second request timeout.
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_timeout(DEFAULT_PROVIDER_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(MarketDataError::Network)?;
        Ok(Self {
            connector,
            client,
            timeout,
            crumb: RwLock::new(None),
        })
    }

    /// Bounds a connector call by the provider timeout.
    async fn bounded<T, F>(&self, fut: F) -> Result<T, MarketDataError>
    where
        F: Future<Output = Result<T, yahoo::YahooError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(|e| map_yahoo_error(e, "")),
            Err(_) => Err(MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }),
        }
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }
        let fresh = self.fetch_crumb().await?;
        *self.crumb.write().await = Some(fresh.clone());
        Ok(fresh)
    }

    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: session cookie
        let response = self
            .client
            .get(COOKIE_URL)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| request_error(e, "Failed to get cookie"))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Failed to parse Yahoo cookie".to_string(),
            })?;

        // Step 2: crumb bound to that cookie
        let crumb = self
            .client
            .get(CRUMB_URL)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| request_error(e, "Failed to get crumb"))?
            .text()
            .await
            .map_err(|e| request_error(e, "Failed to read crumb"))?;

        Ok(CrumbData { cookie, crumb })
    }

    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    async fn fetch_quote_summary(
        &self,
        symbol: &str,
    ) -> Result<YahooQuoteSummaryResult, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "{}/{}?modules=price,summaryDetail,summaryProfile&crumb={}",
            QUOTE_SUMMARY_URL,
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| request_error(e, "quoteSummary request failed"))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            // Next request performs a fresh handshake
            self.clear_crumb().await;
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Yahoo authentication expired".to_string(),
            });
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let data: YahooQuoteSummaryResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse quoteSummary response: {}", e),
                })?;

        data.quote_summary
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }

    async fn load_snapshot(&self, symbol: &str) -> Result<AssetSnapshot, MarketDataError> {
        let summary = self.fetch_quote_summary(symbol).await?;
        map_quote_summary(symbol, &summary)
    }

    // ========================================================================
    // History & Search
    // ========================================================================

    async fn load_history(
        &self,
        symbol: &str,
        range: &HistoryRange,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        let period = match range {
            HistoryRange::Period(p) => p.as_str().to_string(),
            HistoryRange::Days(days) => format!("{}d", days),
        };
        let response = self
            .bounded(
                self.connector
                    .get_quote_range(symbol, HISTORY_INTERVAL, &period),
            )
            .await
            .map_err(|e| with_symbol(e, symbol))?;

        let quotes = response.quotes().map_err(|e| map_yahoo_error(e, symbol))?;

        let mut points: Vec<HistoricalPoint> = quotes
            .into_iter()
            .filter_map(|q| to_point(q.timestamp as i64, q.close, q.volume))
            .collect();
        points.sort_by_key(|p| p.timestamp);

        if points.is_empty() {
            return Err(MarketDataError::NoData(symbol.to_string()));
        }
        Ok(points)
    }

    async fn load_search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let encoded_query = encode(query);
        let result = self
            .bounded(self.connector.search_ticker(&encoded_query))
            .await?;

        Ok(result
            .quotes
            .iter()
            .take(MAX_SEARCH_RESULTS)
            .map(|item| {
                let name = display_name(
                    Some(item.short_name.as_str()),
                    Some(item.long_name.as_str()),
                    &item.symbol,
                );
                SearchResult::new(&normalize_symbol(&item.symbol), &name, AssetType::Stock)
                    .with_exchange(item.exchange.clone())
            })
            .collect())
    }
}

// ============================================================================
// AssetDataProvider Implementation
// ============================================================================

#[async_trait]
impl AssetDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn asset_type(&self) -> AssetType {
        AssetType::Stock
    }

    async fn fetch_snapshot(&self, symbol: &str) -> Option<AssetSnapshot> {
        let symbol = normalize_symbol(symbol);
        debug!("Fetching snapshot for {} from Yahoo", symbol);

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
        debug!("Fetching {} history for {} from Yahoo", range, symbol);

        self.load_history(&symbol, range).await.unwrap_or_else(|e| {
            log_failure("history", &symbol, &e);
            Vec::new()
        })
    }

    async fn search(&self, query: &str) -> Vec<SearchResult> {
        debug!("Searching Yahoo for '{}'", query);

        self.load_search(query).await.unwrap_or_else(|e| {
            warn!("Yahoo search for '{}' failed: {}", query, e);
            Vec::new()
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn log_failure(what: &str, symbol: &str, error: &MarketDataError) {
    if error.is_not_found() {
        debug!("Yahoo {} for {} unavailable: {}", what, symbol, error);
    } else {
        warn!("Yahoo {} for {} failed: {}", what, symbol, error);
    }
}

fn request_error(e: reqwest::Error, context: &str) -> MarketDataError {
    if e.is_timeout() {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("{}: {}", context, e),
        }
    }
}

fn map_yahoo_error(e: yahoo::YahooError, symbol: &str) -> MarketDataError {
    if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
        MarketDataError::SymbolNotFound(symbol.to_string())
    } else {
        MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        }
    }
}

/// Fills in the symbol on not-found errors raised before it was known.
fn with_symbol(error: MarketDataError, symbol: &str) -> MarketDataError {
    match error {
        MarketDataError::SymbolNotFound(s) if s.is_empty() => {
            MarketDataError::SymbolNotFound(symbol.to_string())
        }
        other => other,
    }
}

/// Converts one daily bar; bars without a usable close are dropped.
fn to_point(timestamp: i64, close: f64, volume: u64) -> Option<HistoricalPoint> {
    if !close.is_finite() || close <= 0.0 {
        return None;
    }
    let timestamp = Utc.timestamp_opt(timestamp, 0).single()?;
    Some(HistoricalPoint {
        timestamp,
        price: close,
        volume: Some(volume as f64),
    })
}

/// Short name first, then long name, then the ticker itself.
fn display_name(short_name: Option<&str>, long_name: Option<&str>, symbol: &str) -> String {
    [short_name, long_name]
        .into_iter()
        .flatten()
        .map(|n| n.trim().replace("&amp;", "&"))
        .find(|n| !n.is_empty())
        .unwrap_or_else(|| symbol.to_string())
}

/// Maps a quoteSummary result onto a snapshot. Fails when there is no market price.
fn map_quote_summary(
    symbol: &str,
    result: &YahooQuoteSummaryResult,
) -> Result<AssetSnapshot, MarketDataError> {
    let price = result
        .price
        .as_ref()
        .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;
    let detail = result.summary_detail.as_ref();
    let profile = result.summary_profile.as_ref();

    let current_price = raw(&price.regular_market_price)
        .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;

    let name = display_name(
        price.short_name.as_deref(),
        price.long_name.as_deref(),
        symbol,
    );

    let mut snapshot = AssetSnapshot::new(AssetType::Stock, symbol, &name, current_price);
    snapshot.price_change_24h = raw(&price.regular_market_change);
    // quoteSummary reports the change as a fraction
    snapshot.price_change_percent_24h = raw(&price.regular_market_change_percent).map(|p| p * 100.0);
    snapshot.market_cap =
        raw(&price.market_cap).or_else(|| detail.and_then(|d| raw(&d.market_cap)));
    snapshot.volume_24h =
        raw(&price.regular_market_volume).or_else(|| detail.and_then(|d| raw(&d.volume)));
    snapshot.high_24h = detail
        .and_then(|d| raw(&d.day_high))
        .or_else(|| raw(&price.regular_market_day_high));
    snapshot.low_24h = detail
        .and_then(|d| raw(&d.day_low))
        .or_else(|| raw(&price.regular_market_day_low));
    snapshot.description = profile.and_then(|p| {
        p.long_business_summary
            .clone()
            .or_else(|| p.description.clone())
    });

    Ok(snapshot)
}

// ============================================================================
// Tests
// ============================================================================
