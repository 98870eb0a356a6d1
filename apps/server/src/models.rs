use chrono::{DateTime, Utc};
use pricewatch_core::watchlist as core_watchlist;
use pricewatch_market_data as md;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct Asset {
    /// `stock` or `crypto`
    #[schema(value_type = String, example = "stock")]
    pub asset_type: md::AssetType,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percent_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub last_updated: DateTime<Utc>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub description: Option<String>,
}

impl From<&md::AssetSnapshot> for Asset {
    fn from(s: &md::AssetSnapshot) -> Self {
        Self {
            asset_type: s.asset_type,
            symbol: s.symbol.clone(),
            name: s.name.clone(),
            current_price: s.current_price,
            price_change_24h: s.price_change_24h,
            price_change_percent_24h: s.price_change_percent_24h,
            market_cap: s.market_cap,
            volume_24h: s.volume_24h,
            last_updated: s.last_updated,
            high_24h: s.high_24h,
            low_24h: s.low_24h,
            description: s.description.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct HistoricalPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: Option<f64>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct HistoricalData {
    pub symbol: String,
    #[schema(value_type = String, example = "crypto")]
    pub asset_type: md::AssetType,
    pub data: Vec<HistoricalPoint>,
}

impl From<&md::HistoricalSeries> for HistoricalData {
    fn from(s: &md::HistoricalSeries) -> Self {
        Self {
            symbol: s.symbol.clone(),
            asset_type: s.asset_type,
            data: s
                .data
                .iter()
                .map(|p| HistoricalPoint {
                    timestamp: p.timestamp,
                    price: p.price,
                    volume: p.volume,
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SearchResult {
    pub symbol: String,
    pub name: String,
    #[schema(value_type = String)]
    pub asset_type: md::AssetType,
    pub exchange: Option<String>,
}

impl From<md::SearchResult> for SearchResult {
    fn from(r: md::SearchResult) -> Self {
        Self {
            symbol: r.symbol,
            name: r.name,
            asset_type: r.asset_type,
            exchange: r.exchange,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct NewWatchlistItem {
    #[schema(value_type = String, example = "crypto")]
    pub asset_type: md::AssetType,
    #[schema(example = "BTC")]
    pub symbol: String,
}

impl From<NewWatchlistItem> for core_watchlist::NewWatchlistItem {
    fn from(n: NewWatchlistItem) -> Self {
        Self {
            asset_type: n.asset_type,
            symbol: n.symbol,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct WatchlistItem {
    pub id: i32,
    #[schema(value_type = String)]
    pub asset_type: md::AssetType,
    pub symbol: String,
    pub added_at: DateTime<Utc>,
    /// Live snapshot; null when the provider could not be reached.
    pub asset_info: Option<Asset>,
}

impl From<core_watchlist::WatchlistEntry> for WatchlistItem {
    fn from(e: core_watchlist::WatchlistEntry) -> Self {
        Self {
            id: e.item.id,
            asset_type: e.item.asset_type,
            symbol: e.item.symbol,
            added_at: e.item.added_at,
            asset_info: e.asset_info.as_deref().map(Asset::from),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ServiceStatus {
    pub message: String,
    pub status: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct HealthStatus {
    pub status: String,
}
