//! Historical price series and the ranges used to request them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::AssetType;

/// Smallest day count accepted for crypto history.
pub const MIN_CRYPTO_DAYS: u16 = 1;
/// Largest day count accepted for crypto history.
pub const MAX_CRYPTO_DAYS: u16 = 365;

/// One observation in a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: Option<f64>,
}

/// Ordered (ascending by timestamp) price history for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub symbol: String,
    pub asset_type: AssetType,
    pub data: Vec<HistoricalPoint>,
}

/// Lookback windows understood by the stock provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StockPeriod {
    OneDay,
    FiveDays,
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
}

impl StockPeriod {
    pub const ALL: [StockPeriod; 7] = [
        StockPeriod::OneDay,
        StockPeriod::FiveDays,
        StockPeriod::OneMonth,
        StockPeriod::ThreeMonths,
        StockPeriod::SixMonths,
        StockPeriod::OneYear,
        StockPeriod::FiveYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockPeriod::OneDay => "1d",
            StockPeriod::FiveDays => "5d",
            StockPeriod::OneMonth => "1mo",
            StockPeriod::ThreeMonths => "3mo",
            StockPeriod::SixMonths => "6mo",
            StockPeriod::OneYear => "1y",
            StockPeriod::FiveYears => "5y",
        }
    }

    /// Parses a period token, substituting `1mo` for anything unrecognized.
    pub fn parse_lenient(token: &str) -> Self {
        token.parse().unwrap_or_else(|_| {
            warn!(
                "Unsupported stock period '{}', falling back to {}",
                token,
                StockPeriod::default().as_str()
            );
            StockPeriod::default()
        })
    }
}

impl fmt::Display for StockPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockPeriod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == token)
            .ok_or(())
    }
}

/// Requested history window: a period token for stocks, a day count for crypto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryRange {
    Period(StockPeriod),
    Days(u16),
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryRange::Period(period) => write!(f, "{}", period),
            HistoryRange::Days(days) => write!(f, "{}", days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_periods_parse() {
        for period in StockPeriod::ALL {
            assert_eq!(StockPeriod::parse_lenient(period.as_str()), period);
        }
    }

    #[test]
    fn unknown_period_falls_back_to_one_month() {
        assert_eq!(StockPeriod::parse_lenient("2w"), StockPeriod::OneMonth);
        assert_eq!(StockPeriod::parse_lenient(""), StockPeriod::OneMonth);
        // Tokens are case-sensitive
        assert_eq!(StockPeriod::parse_lenient("1Y"), StockPeriod::OneMonth);
    }

    #[test]
    fn range_renders_as_cache_suffix() {
        assert_eq!(HistoryRange::Period(StockPeriod::SixMonths).to_string(), "6mo");
        assert_eq!(HistoryRange::Days(30).to_string(), "30");
    }
}
