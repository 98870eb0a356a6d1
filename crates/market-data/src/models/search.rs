use serde::{Deserialize, Serialize};

use super::AssetType;

/// A single match returned by a provider's search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub symbol: String,
    pub name: String,
    pub asset_type: AssetType,
    /// Exchange name for stocks, market-cap rank label for crypto.
    pub exchange: Option<String>,
}

impl SearchResult {
    pub fn new(symbol: &str, name: &str, asset_type: AssetType) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            asset_type,
            exchange: None,
        }
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        let exchange = exchange.into();
        if !exchange.is_empty() {
            self.exchange = Some(exchange);
        }
        self
    }
}
