use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{Asset, HistoricalData, SearchResult},
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use pricewatch_core::{assets::SearchScope, constants::DEFAULT_CRYPTO_DAYS};

#[derive(serde::Deserialize)]
pub struct StockHistoryQuery {
    period: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct CryptoHistoryQuery {
    days: Option<i64>,
}

#[derive(serde::Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    query: String,
    #[serde(default)]
    asset_type: String,
}

#[utoipa::path(
    get,
    path = "/api/assets/stocks/{symbol}",
    params(("symbol" = String, Path, description = "Ticker, case-insensitive")),
    responses((status = 200, body = Asset), (status = 404, description = "Unknown symbol"))
)]
pub async fn get_stock(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Asset>> {
    let snapshot = state.asset_service.get_stock(&symbol).await?;
    Ok(Json(Asset::from(snapshot.as_ref())))
}

#[utoipa::path(
    get,
    path = "/api/assets/stocks/{symbol}/history",
    params(
        ("symbol" = String, Path,),
        ("period" = Option<String>, Query, description = "1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd or max; anything else means 1mo")
    ),
    responses((status = 200, body = HistoricalData), (status = 404, description = "No data"))
)]
pub async fn get_stock_history(
    Path(symbol): Path<String>,
    Query(q): Query<StockHistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HistoricalData>> {
    let period = q.period.unwrap_or_default();
    let series = state
        .asset_service
        .get_stock_history(&symbol, &period)
        .await?;
    Ok(Json(HistoricalData::from(series.as_ref())))
}

#[utoipa::path(
    get,
    path = "/api/assets/crypto/{symbol}",
    params(("symbol" = String, Path, description = "Ticker such as BTC")),
    responses((status = 200, body = Asset), (status = 404, description = "Unknown symbol"))
)]
pub async fn get_crypto(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Asset>> {
    let snapshot = state.asset_service.get_crypto(&symbol).await?;
    Ok(Json(Asset::from(snapshot.as_ref())))
}

#[utoipa::path(
    get,
    path = "/api/assets/crypto/{symbol}/history",
    params(
        ("symbol" = String, Path,),
        ("days" = Option<i64>, Query, description = "Lookback in days, 1 to 365")
    ),
    responses(
        (status = 200, body = HistoricalData),
        (status = 400, description = "days out of range"),
        (status = 404, description = "No data")
    )
)]
pub async fn get_crypto_history(
    Path(symbol): Path<String>,
    Query(q): Query<CryptoHistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HistoricalData>> {
    let days = q.days.unwrap_or(i64::from(DEFAULT_CRYPTO_DAYS));
    let series = state
        .asset_service
        .get_crypto_history(&symbol, days)
        .await?;
    Ok(Json(HistoricalData::from(series.as_ref())))
}

#[utoipa::path(
    get,
    path = "/api/assets/search",
    params(
        ("query" = String, Query,),
        ("asset_type" = Option<String>, Query, description = "all, stock or crypto")
    ),
    responses((status = 200, body = [SearchResult]), (status = 400, description = "Bad query"))
)]
pub async fn search_assets(
    Query(q): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SearchResult>>> {
    let scope: SearchScope = q.asset_type.parse()?;
    let results = state.asset_service.search(&q.query, scope).await?;
    Ok(Json(results.into_iter().map(SearchResult::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets/stocks/{symbol}", get(get_stock))
        .route("/assets/stocks/{symbol}/history", get(get_stock_history))
        .route("/assets/crypto/{symbol}", get(get_crypto))
        .route("/assets/crypto/{symbol}/history", get(get_crypto_history))
        .route("/assets/search", get(search_assets))
}
