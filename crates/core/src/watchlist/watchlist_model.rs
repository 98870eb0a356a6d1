use std::sync::Arc;

use chrono::{DateTime, Utc};
use pricewatch_market_data::{normalize_symbol, AssetSnapshot, AssetType, MAX_SYMBOL_LEN};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a tracked symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: i32,
    pub asset_type: AssetType,
    pub symbol: String,
    pub added_at: DateTime<Utc>,
}

/// Input model for adding a symbol to the watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWatchlistItem {
    pub asset_type: AssetType,
    pub symbol: String,
}

impl NewWatchlistItem {
    pub fn new(asset_type: AssetType, symbol: &str) -> Self {
        Self {
            asset_type,
            symbol: symbol.to_string(),
        }
    }

    /// Returns the item with its symbol normalized, rejecting empty or over-long symbols.
    pub fn normalized(self) -> Result<Self> {
        let symbol = normalize_symbol(&self.symbol);
        if symbol.is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        if symbol.chars().count() > MAX_SYMBOL_LEN {
            return Err(ValidationError::InvalidInput(format!(
                "symbol must be at most {} characters",
                MAX_SYMBOL_LEN
            ))
            .into());
        }
        Ok(Self {
            asset_type: self.asset_type,
            symbol,
        })
    }
}

/// A watchlist item joined with its live snapshot, when one could be fetched.
#[derive(Debug, Clone)]
pub struct WatchlistEntry {
    pub item: WatchlistItem,
    pub asset_info: Option<Arc<AssetSnapshot>>,
}
