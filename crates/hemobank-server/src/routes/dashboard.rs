//! Dashboard Routes - Aggregated Statistics and Health

use axum::{extract::State, routing::get, Json, Router};

use crate::models::{ApiResponse, DashboardStatsResponse, HealthStatusResponse};
use crate::routes::{error_response, ApiError};
use crate::AppState;

/// Point-in-time statistics over donors, inventory and requests
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStatsResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStatsResponse>>, ApiError> {
    let snapshot = state
        .dashboard_service
        .snapshot()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Dashboard statistics retrieved",
        snapshot.into(),
    )))
}

/// Coarse system health signal
#[utoipa::path(
    get,
    path = "/api/dashboard/health",
    responses(
        (status = 200, description = "System health", body = HealthStatusResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthStatusResponse>>, ApiError> {
    let status = state
        .dashboard_service
        .health_status()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "System health retrieved",
        HealthStatusResponse { status },
    )))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/dashboard/health", get(dashboard_health))
}
