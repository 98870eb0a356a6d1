//! Asset classes and point-in-time snapshots.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// The two asset classes the providers cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Stock,
    Crypto,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "stock",
            AssetType::Crypto => "crypto",
        }
    }

    /// Capitalized label used in user-facing messages ("Stock AAPL not found").
    pub fn label(&self) -> &'static str {
        match self {
            AssetType::Stock => "Stock",
            AssetType::Crypto => "Crypto",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(AssetType::Stock),
            "crypto" => Ok(AssetType::Crypto),
            other => Err(MarketDataError::ValidationFailed {
                message: format!("Unknown asset type '{}'", other),
            }),
        }
    }
}

/// Current state of one instrument as reported by a provider.
///
/// Built fresh on every provider fetch and never mutated afterwards. Every
/// numeric field is optional because providers omit them freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub asset_type: AssetType,
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

impl AssetSnapshot {
    /// Snapshot with only identity and price set; the rest is filled by the adapter.
    pub fn new(asset_type: AssetType, symbol: &str, name: &str, current_price: f64) -> Self {
        Self {
            asset_type,
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: Some(current_price),
            price_change_24h: None,
            price_change_percent_24h: None,
            market_cap: None,
            volume_24h: None,
            last_updated: Utc::now(),
            high_24h: None,
            low_24h: None,
            description: None,
        }
    }
}
