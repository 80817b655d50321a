use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::services::DashboardStats;
use crate::AppState;

/// GET /api/dashboard
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.store.dashboard_stats().await?))
}
