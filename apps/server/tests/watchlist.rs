mod common;

use axum::http::{Method, StatusCode};
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn add_then_duplicate_is_rejected() {
    let app = spawn_app().await;

    let (status, bytes) = app
        .send(
            Method::POST,
            "/api/watchlist/",
            Some(json!({ "asset_type": "crypto", "symbol": "BTC" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(created["id"].is_i64());
    assert!(created["added_at"].is_string());
    assert_eq!(created["symbol"], "BTC");
    assert_eq!(created["asset_info"]["current_price"], 65000.0);

    let (status, bytes) = app
        .send(
            Method::POST,
            "/api/watchlist/",
            Some(json!({ "asset_type": "crypto", "symbol": "btc" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(err["message"], "BTC is already in your watchlist");
}

#[tokio::test]
async fn unknown_symbol_cannot_be_added() {
    let app = spawn_app().await;
    let (status, bytes) = app
        .send(
            Method::POST,
            "/api/watchlist",
            Some(json!({ "asset_type": "stock", "symbol": "NOPE" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(err["message"], "Stock NOPE not found");

    let (_, list) = app.get_json("/api/watchlist/").await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = spawn_app().await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/watchlist/",
            Some(json!({ "asset_type": "bond", "symbol": "X" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_joins_live_snapshots_in_insertion_order() {
    let app = spawn_app().await;
    for (asset_type, symbol) in [("stock", "AAPL"), ("crypto", "ETH")] {
        let (status, _) = app
            .send(
                Method::POST,
                "/api/watchlist/",
                Some(json!({ "asset_type": asset_type, "symbol": symbol })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get_json("/api/watchlist").await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["symbol"], "AAPL");
    assert_eq!(items[0]["asset_info"]["name"], "Apple Inc.");
    assert_eq!(items[1]["symbol"], "ETH");
    assert_eq!(items[1]["asset_type"], "crypto");
}

#[tokio::test]
async fn remove_returns_message_then_404() {
    let app = spawn_app().await;
    let (_, bytes) = app
        .send(
            Method::POST,
            "/api/watchlist/",
            Some(json!({ "asset_type": "stock", "symbol": "msft" })),
        )
        .await;
    let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let uri = format!("/api/watchlist/{}", created["id"]);

    let (status, bytes) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "message": "Removed MSFT from watchlist" }));

    let (status, bytes) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(err["message"], "Watchlist item not found");
}
