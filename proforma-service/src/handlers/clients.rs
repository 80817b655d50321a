//! Client handlers.

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
use crate::dtos::{ClientResponse, ClientsResponse, ListQuery};
use crate::models::NewClient;
use crate::services::search;
use crate::AppState;

/// List clients, optionally filtered by `?q=`.
///
/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ClientsResponse>, AppError> {
    let clients = state.store.list_clients().await?;

    Ok(Json(ClientsResponse {
        clients: search::filter(clients, query.q.as_deref()),
        message: demo_notice(&state),
    }))
}

/// GET /api/clients/:id
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientResponse>, AppError> {
    let client = state
        .store
        .get_client(id)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;

    Ok(Json(ClientResponse {
        client,
        message: None,
    }))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<NewClient>,
) -> Result<(StatusCode, Json<ClientResponse>), AppError> {
    input.validate()?;

    let client = state.store.create_client(input).await?;
    let (status, message) = created(&state, "client");

    Ok((status, Json(ClientResponse { client, message })))
}

/// DELETE /api/clients/:id
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let found = state.store.delete_client(id).await?;
    deleted(&state, found, "Client")
}
