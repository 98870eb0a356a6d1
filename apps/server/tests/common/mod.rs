#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use pricewatch_market_data::{
    AssetDataProvider, AssetSnapshot, AssetType, HistoricalPoint, HistoryRange, SearchResult,
};
use pricewatch_server::{api::app_router, build_state_with_providers, config::Config};
use tempfile::TempDir;
use tower::ServiceExt;

/// Provider serving a fixed set of symbols and counting snapshot calls.
pub struct FakeProvider {
    asset_type: AssetType,
    known: Vec<(&'static str, &'static str, f64)>,
    pub snapshot_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn stocks() -> Self {
        Self {
            asset_type: AssetType::Stock,
            known: vec![
                ("AAPL", "Apple Inc.", 150.0),
                ("MSFT", "Microsoft Corporation", 410.0),
            ],
            snapshot_calls: AtomicUsize::new(0),
        }
    }

    pub fn crypto() -> Self {
        Self {
            asset_type: AssetType::Crypto,
            known: vec![("BTC", "Bitcoin", 65000.0), ("ETH", "Ethereum", 3200.0)],
            snapshot_calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetDataProvider for FakeProvider {
    fn id(&self) -> &'static str {
        "FAKE"
    }

    fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    async fn fetch_snapshot(&self, symbol: &str) -> Option<AssetSnapshot> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        self.known
            .iter()
            .find(|(s, _, _)| *s == symbol)
            .map(|(s, name, price)| AssetSnapshot::new(self.asset_type, s, name, *price))
    }

    async fn fetch_history(&self, symbol: &str, range: &HistoryRange) -> Vec<HistoricalPoint> {
        if !self.known.iter().any(|(s, _, _)| *s == symbol) {
            return Vec::new();
        }
        let points = match range {
            HistoryRange::Days(days) => usize::from(*days),
            HistoryRange::Period(_) => 21,
        };
        let start = Utc::now() - Duration::days(points as i64);
        (0..points)
            .map(|i| HistoricalPoint {
                timestamp: start + Duration::days(i as i64),
                price: 100.0 + i as f64,
                volume: Some(1_000.0),
            })
            .collect()
    }

    async fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.to_uppercase();
        (0..5)
            .map(|i| {
                SearchResult::new(&format!("{}{}", query, i), "Match", self.asset_type)
                    .with_exchange(if self.asset_type == AssetType::Stock {
                        "NASDAQ".to_string()
                    } else {
                        format!("Rank #{}", i + 1)
                    })
            })
            .collect()
    }
}

pub struct TestApp {
    pub router: Router,
    pub stock: Arc<FakeProvider>,
    pub crypto: Arc<FakeProvider>,
    _tmp: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = Config::from_env().unwrap();
    config.db_path = tmp
        .path()
        .join("db")
        .join("test.db")
        .to_string_lossy()
        .to_string();

    let stock = Arc::new(FakeProvider::stocks());
    let crypto = Arc::new(FakeProvider::crypto());
    let state = build_state_with_providers(&config, stock.clone(), crypto.clone())
        .await
        .unwrap();

    TestApp {
        router: app_router(state, &config),
        stock,
        crypto,
        _tmp: tmp,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = self.send(Method::GET, uri, None).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
