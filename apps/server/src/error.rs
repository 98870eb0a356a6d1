use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pricewatch_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                // Duplicates are reported as a bad request rather than 409.
                CoreError::Conflict(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                CoreError::Database(_) | CoreError::Unexpected(_) => {
                    tracing::error!("Request failed: {}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                }
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pricewatch_core::errors::ValidationError;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn core_errors_map_to_status_codes() {
        assert_eq!(
            status_of(CoreError::NotFound("Stock X not found".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::Conflict("X is already in your watchlist".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::from(ValidationError::MissingField("query".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::Unexpected("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
