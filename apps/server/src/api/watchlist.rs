use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{MessageResponse, NewWatchlistItem, WatchlistItem},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

#[utoipa::path(
    get,
    path = "/api/watchlist/",
    responses((status = 200, body = [WatchlistItem]))
)]
pub async fn list_watchlist(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<WatchlistItem>>> {
    let entries = state.watchlist_service.list().await?;
    Ok(Json(entries.into_iter().map(WatchlistItem::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/watchlist/",
    request_body = NewWatchlistItem,
    responses(
        (status = 201, body = WatchlistItem),
        (status = 400, description = "Duplicate or invalid symbol"),
        (status = 404, description = "Unknown symbol")
    )
)]
pub async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewWatchlistItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<WatchlistItem>)> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let entry = state.watchlist_service.add(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(WatchlistItem::from(entry))))
}

#[utoipa::path(
    delete,
    path = "/api/watchlist/{id}",
    params(("id" = i32, Path,)),
    responses((status = 200, body = MessageResponse), (status = 404, description = "Unknown id"))
)]
pub async fn remove_from_watchlist(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    let symbol = state.watchlist_service.remove(id).await?;
    Ok(Json(MessageResponse {
        message: format!("Removed {} from watchlist", symbol),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/watchlist", get(list_watchlist).post(add_to_watchlist))
        .route("/watchlist/", get(list_watchlist).post(add_to_watchlist))
        .route("/watchlist/{id}", delete(remove_from_watchlist))
}
