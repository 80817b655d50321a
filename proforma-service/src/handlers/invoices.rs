//! Proforma invoice handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use service_core::error::AppError;
use tracing::info;
use uuid::Uuid;

use super::{created, deleted, demo_notice, mode};
use crate::dtos::{
    CreateInvoiceRequest, CreateInvoiceResponse, InvoicePreviewResponse, InvoiceResponse,
    InvoicesResponse, ListQuery, NextProformaResponse,
};
use crate::services::format::CURRENCY_CODE;
use crate::services::invoicing::{next_proforma_no, prepare_invoice};
use crate::services::metrics::INVOICE_AMOUNT_TOTAL;
use crate::services::search;
use crate::AppState;

/// List invoices newest first, optionally filtered by `?q=`.
///
/// GET /api/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<InvoicesResponse>, AppError> {
    let invoices = state.store.list_invoices().await?;

    Ok(Json(InvoicesResponse {
        invoices: search::filter(invoices, query.q.as_deref()),
        message: demo_notice(&state),
    }))
}

/// Create an invoice. Line totals, subtotal, VAT and total are computed here;
/// any totals in the request are ignored.
///
/// POST /api/invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<CreateInvoiceResponse>), AppError> {
    let prepared = prepare_invoice(state.store.as_ref(), request, Utc::now().date_naive()).await?;
    let invoice = state.store.create_invoice(prepared).await?;

    let (status, message) = created(&state, "invoice");
    if let Some(amount) = invoice.total.to_f64() {
        INVOICE_AMOUNT_TOTAL
            .with_label_values(&[CURRENCY_CODE, mode(&state)])
            .inc_by(amount);
    }

    info!(
        invoice_id = %invoice.id,
        proforma_no = %invoice.proforma_no,
        total = %invoice.total,
        "Proforma invoice issued"
    );

    Ok((
        status,
        Json(CreateInvoiceResponse {
            success: true,
            invoice,
            message,
        }),
    ))
}

/// Compute an invoice from a request without storing it.
///
/// POST /api/invoices/preview
pub async fn preview_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<Json<InvoicePreviewResponse>, AppError> {
    let invoice = prepare_invoice(state.store.as_ref(), request, Utc::now().date_naive()).await?;
    Ok(Json(InvoicePreviewResponse { invoice }))
}

/// GET /api/invoices/next-number
pub async fn next_number(
    State(state): State<AppState>,
) -> Result<Json<NextProformaResponse>, AppError> {
    let max_in_use = state.store.max_proforma_no().await?;
    Ok(Json(NextProformaResponse {
        proforma_no: next_proforma_no(max_in_use),
    }))
}

/// GET /api/invoices/:id
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let invoice = state
        .store
        .get_invoice(id)
        .await?
        .ok_or_else(|| AppError::not_found("Invoice not found"))?;

    Ok(Json(InvoiceResponse { invoice }))
}

/// DELETE /api/invoices/:id
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let found = state.store.delete_invoice(id).await?;
    deleted(&state, found, "Invoice")
}
