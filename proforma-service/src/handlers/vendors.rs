//! Vendor handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use super::{created, deleted, demo_notice};
use crate::dtos::{ListQuery, VendorResponse, VendorsResponse};
use crate::models::NewVendor;
use crate::services::search;
use crate::AppState;

/// List vendors, optionally filtered by `?q=`.
///
/// GET /api/vendors
pub async fn list_vendors(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<VendorsResponse>, AppError> {
    let vendors = state.store.list_vendors().await?;

    Ok(Json(VendorsResponse {
        vendors: search::filter(vendors, query.q.as_deref()),
        message: demo_notice(&state),
    }))
}

/// GET /api/vendors/:id
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VendorResponse>, AppError> {
    let vendor = state
        .store
        .get_vendor(id)
        .await?
        .ok_or_else(|| AppError::not_found("Vendor not found"))?;

    Ok(Json(VendorResponse {
        vendor,
        message: None,
    }))
}

/// POST /api/vendors
pub async fn create_vendor(
    State(state): State<AppState>,
    Json(input): Json<NewVendor>,
) -> Result<(StatusCode, Json<VendorResponse>), AppError> {
    input.validate()?;

    let vendor = state.store.create_vendor(input).await?;
    let (status, message) = created(&state, "vendor");

    Ok((status, Json(VendorResponse { vendor, message })))
}

/// DELETE /api/vendors/:id
pub async fn delete_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let found = state.store.delete_vendor(id).await?;
    deleted(&state, found, "Vendor")
}
