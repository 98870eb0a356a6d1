use std::sync::Arc;

use crate::{config::Config, main_lib::AppState, models};
use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub mod assets;
pub mod health;
pub mod watchlist;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        assets::get_stock,
        assets::get_stock_history,
        assets::get_crypto,
        assets::get_crypto_history,
        assets::search_assets,
        watchlist::list_watchlist,
        watchlist::add_to_watchlist,
        watchlist::remove_from_watchlist,
    ),
    components(schemas(
        models::Asset,
        models::HistoricalPoint,
        models::HistoricalData,
        models::SearchResult,
        models::NewWatchlistItem,
        models::WatchlistItem,
        models::MessageResponse,
        models::ServiceStatus,
        models::HealthStatus,
    )),
    tags((name = "pricewatch"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_allow.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    layer.allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .merge(assets::router())
        .merge(watchlist::router());

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .nest("/api", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
