use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;
use tracing::warn;

use crate::AppState;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "proforma-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once the store answers; demo mode is always ready.
pub async fn readiness_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    if let Err(e) = state.store.health_check().await {
        warn!(error = %e, "Readiness check failed");
        return Err(AppError::ServiceUnavailable);
    }

    Ok(Json(json!({
        "status": "ready",
        "mode": if state.store.is_demo() { "demo" } else { "database" }
    })))
}
