//! Error types for the market data crate.
//!
//! [`MarketDataError`] is what provider internals return. It never crosses the
//! [`AssetDataProvider`](crate::provider::AssetDataProvider) boundary: adapters
//! log it and report "absent" or "empty" instead, so a flaky upstream can never
//! fail a request with anything other than not-found.

use thiserror::Error;

/// Errors that can occur while talking to an upstream provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider does not know the symbol, or the symbol has no mapping.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol exists but the response carried no usable data points.
    #[error("No data returned for {0}")]
    NoData(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-2xx status, malformed body, ...).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// Input or response data failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// True when the failure says something about the symbol rather than the upstream.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_) | Self::NoData(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("AAPL".to_string());
        assert_eq!(error.to_string(), "Symbol not found: AAPL");

        let error = MarketDataError::Timeout {
            provider: "COINGECKO".to_string(),
        };
        assert_eq!(error.to_string(), "Timeout: COINGECKO");

        let error = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(error.to_string(), "Provider error: YAHOO - HTTP 500");
    }

    #[test]
    fn test_is_not_found() {
        assert!(MarketDataError::SymbolNotFound("X".into()).is_not_found());
        assert!(MarketDataError::NoData("X".into()).is_not_found());
        assert!(!MarketDataError::RateLimited {
            provider: "YAHOO".into()
        }
        .is_not_found());
    }
}
