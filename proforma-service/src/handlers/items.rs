//! Inventory item handlers.

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
use crate::dtos::{ItemResponse, ItemsResponse, ListQuery};
use crate::models::NewItem;
use crate::services::search;
use crate::AppState;

/// List items filtered by `?q=` and `?category=`. The stock summary and the
/// category list cover every item regardless of the filters.
///
/// GET /api/items
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ItemsResponse>, AppError> {
    let items = state.store.list_items().await?;

    let low_stock_count = search::low_stock_count(&items);
    let inventory_value = search::inventory_value(&items);
    let categories = search::categories(&items);
    let items = search::filter_category(
        search::filter(items, query.q.as_deref()),
        query.category.as_deref(),
    );

    Ok(Json(ItemsResponse {
        items,
        low_stock_count,
        inventory_value,
        categories,
        message: demo_notice(&state),
    }))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<NewItem>,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    input.validate()?;

    let item = state.store.create_item(input).await?;
    let (status, message) = created(&state, "item");

    Ok((status, Json(ItemResponse { item, message })))
}

/// DELETE /api/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let found = state.store.delete_item(id).await?;
    deleted(&state, found, "Item")
}
