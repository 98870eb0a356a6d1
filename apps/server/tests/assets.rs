mod common;

use axum::http::{Method, StatusCode};
use common::spawn_app;

#[tokio::test]
async fn stock_snapshot_is_cached_between_calls() {
    let app = spawn_app().await;

    let (status, first) = app.send(Method::GET, "/api/assets/stocks/AAPL", None).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&first).unwrap();
    assert_eq!(json["asset_type"], "stock");
    assert_eq!(json["symbol"], "AAPL");
    assert_eq!(json["current_price"], 150.0);

    let (status, second) = app.send(Method::GET, "/api/assets/stocks/aapl", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(app.stock.calls(), 1);
}

#[tokio::test]
async fn unknown_symbols_are_404_with_error_body() {
    let app = spawn_app().await;

    let (status, body) = app.get_json("/api/assets/stocks/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "Stock NOPE not found");

    let (status, body) = app.get_json("/api/assets/crypto/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Crypto NOPE not found");
}

#[tokio::test]
async fn crypto_snapshot_uses_crypto_provider() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/assets/crypto/btc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["asset_type"], "crypto");
    assert_eq!(body["name"], "Bitcoin");
    assert_eq!(app.stock.calls(), 0);
    assert_eq!(app.crypto.calls(), 1);
}

#[tokio::test]
async fn stock_history_accepts_unknown_period() {
    let app = spawn_app().await;
    let (status, body) = app
        .get_json("/api/assets/stocks/MSFT/history?period=2w")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "MSFT");
    assert_eq!(body["data"].as_array().unwrap().len(), 21);
}

#[tokio::test]
async fn stock_history_of_unknown_symbol_is_404() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/assets/stocks/NOPE/history").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No historical data found for NOPE");
}

#[tokio::test]
async fn crypto_history_defaults_to_thirty_days() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/assets/crypto/ETH/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn crypto_history_rejects_out_of_range_days() {
    let app = spawn_app().await;
    for days in ["0", "366"] {
        let (status, body) = app
            .get_json(&format!("/api/assets/crypto/BTC/history?days={}", days))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "days={}", days);
        assert_eq!(body["code"], 400);
    }
}

#[tokio::test]
async fn search_lists_stocks_before_crypto() {
    let app = spawn_app().await;
    let (status, body) = app
        .get_json("/api/assets/search?query=bit&asset_type=all")
        .await;
    assert_eq!(status, StatusCode::OK);

    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 10);
    assert!(results[..5].iter().all(|r| r["asset_type"] == "stock"));
    assert!(results[5..].iter().all(|r| r["asset_type"] == "crypto"));
}

#[tokio::test]
async fn search_validates_inputs() {
    let app = spawn_app().await;

    let (status, _) = app.get_json("/api/assets/search?query=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .get_json("/api/assets/search?query=bit&asset_type=bond")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .get_json("/api/assets/search?query=eth&asset_type=crypto")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
}
