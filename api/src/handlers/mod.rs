use axum::Json;
use chrono::Utc;
use mcontrol_common::views::HealthResponse;

use crate::error::ApiError;

pub mod auth;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["health"],
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".into(),
        timestamp: Utc::now(),
    })
}

/// Catch-all for unmatched `/api` routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
