//! Request and response bodies for the HTTP API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Client, CompanyProfile, Invoice, Item, NewInvoice, Vendor};

/// `?q=` free-text search and optional `?category=` for items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    pub clients: Vec<Client>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub client: Client,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VendorsResponse {
    pub vendors: Vec<Vendor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VendorResponse {
    pub vendor: Vendor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
    /// Items at or below their minimum stock level, across all items.
    pub low_stock_count: usize,
    /// Stock on hand at cost, across all items.
    pub inventory_value: Decimal,
    /// Distinct categories across all items, sorted, for the category filter.
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InvoicesResponse {
    pub invoices: Vec<Invoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
    pub success: bool,
    pub invoice: Invoice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// An invoice as it would be stored, without saving it.
#[derive(Debug, Serialize)]
pub struct InvoicePreviewResponse {
    pub invoice: NewInvoice,
}

#[derive(Debug, Serialize)]
pub struct NextProformaResponse {
    pub proforma_no: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyProfileSaved {
    pub message: String,
    pub data: CompanyProfile,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn default_unit() -> String {
    "pcs".to_string()
}

/// One submitted invoice line. Any `sn` or `total` sent by the caller is
/// ignored; both are derived on the server.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceLineInput {
    #[serde(default)]
    pub particulars: String,
    #[serde(default)]
    pub qty: Decimal,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub price_per_unit: Decimal,
}

/// Body of `POST /api/invoices` and `POST /api/invoices/preview`.
///
/// With `client_id` the customer fields are copied from that client;
/// otherwise the customer fields given here are used as-is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateInvoiceRequest {
    pub client_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_country: Option<String>,
    pub tin_no: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub proforma_no: Option<String>,
    pub items: Vec<InvoiceLineInput>,
    pub remarks: Option<String>,
    pub account_name: Option<String>,
    pub account_no: Option<String>,
}
