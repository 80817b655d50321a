//! HTTP handlers for proforma-service.

pub mod clients;
pub mod company_profile;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod items;
pub mod metrics;
pub mod print;
pub mod vendors;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

use crate::dtos::MessageResponse;
use crate::services::metrics::RECORDS_CREATED_TOTAL;
use crate::AppState;

/// Attached to list responses served from sample data.
pub(crate) const DEMO_READ_NOTICE: &str = "Demo mode: showing sample data";

pub(crate) fn demo_notice(state: &AppState) -> Option<String> {
    state
        .store
        .is_demo()
        .then(|| DEMO_READ_NOTICE.to_string())
}

/// Metric label for where writes go: `demo` or `database`.
pub(crate) fn mode(state: &AppState) -> &'static str {
    if state.store.is_demo() {
        "demo"
    } else {
        "database"
    }
}

/// Status and optional notice for a create. Demo creates are not stored, so
/// they answer 200 rather than 201.
pub(crate) fn created(state: &AppState, kind: &str) -> (StatusCode, Option<String>) {
    RECORDS_CREATED_TOTAL
        .with_label_values(&[kind, mode(state)])
        .inc();

    if state.store.is_demo() {
        (
            StatusCode::OK,
            Some(format!("Demo mode: {} was not saved", kind)),
        )
    } else {
        (StatusCode::CREATED, None)
    }
}

/// Response for a delete: 404 for unknown ids, 204 when removed, and a
/// 200 notice in demo mode where nothing is removed.
pub(crate) fn deleted(state: &AppState, found: bool, what: &str) -> Result<Response, AppError> {
    if !found {
        return Err(AppError::not_found(format!("{} not found", what)));
    }

    if state.store.is_demo() {
        let message = format!("Demo mode: {} was not deleted", what.to_lowercase());
        return Ok((StatusCode::OK, Json(MessageResponse { message })).into_response());
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
