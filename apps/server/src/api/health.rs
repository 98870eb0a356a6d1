use crate::models::{HealthStatus, ServiceStatus};
use axum::Json;

#[utoipa::path(get, path = "/", responses((status = 200, body = ServiceStatus)))]
pub async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        message: "Investment Dashboard API".to_string(),
        status: "running".to_string(),
    })
}

#[utoipa::path(get, path = "/health", responses((status = 200, body = HealthStatus)))]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
    })
}
