//! Yahoo Finance API response models.
//!
//! These models cover the quoteSummary endpoint with the `price`,
//! `summaryDetail` and `summaryProfile` modules, which together carry
//! everything an asset snapshot needs.

use serde::Deserialize;

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<YahooQuoteSummaryResult>>,
}

/// Individual result from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
    pub summary_profile: Option<YahooSummaryProfile>,
    pub summary_detail: Option<YahooSummaryDetail>,
}

/// Price module
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub regular_market_price: Option<YahooPriceDetail>,
    pub regular_market_change: Option<YahooPriceDetail>,
    pub regular_market_change_percent: Option<YahooPriceDetail>,
    pub regular_market_day_high: Option<YahooPriceDetail>,
    pub regular_market_day_low: Option<YahooPriceDetail>,
    pub regular_market_volume: Option<YahooPriceDetail>,
    pub market_cap: Option<YahooPriceDetail>,
}

/// Price detail with raw and formatted values.
/// Yahoo sends `{}` when a value is unavailable, which leaves `raw` empty.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct YahooPriceDetail {
    pub raw: Option<f64>,
}

/// Summary profile data (company info)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryProfile {
    pub long_business_summary: Option<String>,
    pub description: Option<String>,
}

/// Summary detail data (trading-day figures)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryDetail {
    pub day_high: Option<YahooPriceDetail>,
    pub day_low: Option<YahooPriceDetail>,
    pub market_cap: Option<YahooPriceDetail>,
    pub volume: Option<YahooPriceDetail>,
}

/// Unwraps the `raw` number from an optional detail object.
pub fn raw(detail: &Option<YahooPriceDetail>) -> Option<f64> {
    detail.as_ref().and_then(|d| d.raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_price_detail_empty_object() {
        let detail: YahooPriceDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(detail.raw, None);
    }

    #[test]
    fn test_deserialize_error_response() {
        // Unknown symbols come back with a null result and an error object
        let json = r#"{"quoteSummary": {"result": null, "error": {"code": "Not Found"}}}"#;
        let resp: YahooQuoteSummaryResponse = serde_json::from_str(json).unwrap();
        assert!(resp.quote_summary.result.is_none());
    }

    #[test]
    fn test_deserialize_summary_detail() {
        let json = r#"{
            "dayHigh": {"raw": 151.2, "fmt": "151.20"},
            "dayLow": {"raw": 148.9, "fmt": "148.90"},
            "marketCap": {"raw": 2800000000000, "fmt": "2.8T"},
            "volume": {}
        }"#;
        let detail: YahooSummaryDetail = serde_json::from_str(json).unwrap();
        assert_eq!(raw(&detail.day_high), Some(151.2));
        assert_eq!(raw(&detail.market_cap), Some(2800000000000.0));
        assert_eq!(raw(&detail.volume), None);
    }
}
