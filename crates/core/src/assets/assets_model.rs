use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use pricewatch_market_data::AssetType;

/// Which providers a search fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    All,
    Stock,
    Crypto,
}

impl SearchScope {
    pub fn includes(&self, asset_type: AssetType) -> bool {
        match self {
            SearchScope::All => true,
            SearchScope::Stock => asset_type == AssetType::Stock,
            SearchScope::Crypto => asset_type == AssetType::Crypto,
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchScope::All => "all",
            SearchScope::Stock => "stock",
            SearchScope::Crypto => "crypto",
        };
        f.write_str(s)
    }
}

impl FromStr for SearchScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(SearchScope::All),
            "stock" => Ok(SearchScope::Stock),
            "crypto" => Ok(SearchScope::Crypto),
            other => Err(ValidationError::InvalidInput(format!(
                "asset_type must be one of all, stock, crypto (got '{}')",
                other
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_parsing() {
        assert_eq!("ALL".parse::<SearchScope>().unwrap(), SearchScope::All);
        assert_eq!("".parse::<SearchScope>().unwrap(), SearchScope::All);
        assert_eq!("crypto".parse::<SearchScope>().unwrap(), SearchScope::Crypto);
        assert!(matches!(
            "bonds".parse::<SearchScope>(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn scope_membership() {
        assert!(SearchScope::All.includes(AssetType::Crypto));
        assert!(SearchScope::Stock.includes(AssetType::Stock));
        assert!(!SearchScope::Stock.includes(AssetType::Crypto));
    }
}
