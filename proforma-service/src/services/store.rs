//! Persistence seam shared by the PostgreSQL store and the demo store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use service_core::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{
    Client, CompanyProfile, CompanyProfileInput, Invoice, Item, NewClient, NewInvoice, NewItem,
    NewVendor, Vendor,
};

/// Number of invoices shown on the dashboard.
pub const RECENT_INVOICES: i64 = 5;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_clients: i64,
    pub total_vendors: i64,
    pub total_items: i64,
    pub total_invoices: i64,
    /// Invoices dated in the current calendar month (UTC).
    pub invoices_this_month: i64,
    pub total_revenue: Decimal,
    pub low_stock_items: i64,
    pub inventory_value: Decimal,
    pub recent_invoices: Vec<Invoice>,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// True when writes are simulated against in-memory sample data.
    fn is_demo(&self) -> bool {
        false
    }

    async fn health_check(&self) -> Result<(), AppError>;

    /// Clients ordered by name.
    async fn list_clients(&self) -> Result<Vec<Client>, AppError>;
    async fn get_client(&self, id: Uuid) -> Result<Option<Client>, AppError>;
    async fn create_client(&self, input: NewClient) -> Result<Client, AppError>;
    async fn delete_client(&self, id: Uuid) -> Result<bool, AppError>;

    /// Vendors ordered by name.
    async fn list_vendors(&self) -> Result<Vec<Vendor>, AppError>;
    async fn get_vendor(&self, id: Uuid) -> Result<Option<Vendor>, AppError>;
    async fn create_vendor(&self, input: NewVendor) -> Result<Vendor, AppError>;
    async fn delete_vendor(&self, id: Uuid) -> Result<bool, AppError>;

    /// Items ordered by name, with the vendor name resolved.
    async fn list_items(&self) -> Result<Vec<Item>, AppError>;
    async fn create_item(&self, input: NewItem) -> Result<Item, AppError>;
    async fn delete_item(&self, id: Uuid) -> Result<bool, AppError>;

    /// Invoices newest first, lines ordered by serial number.
    async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError>;
    async fn get_invoice(&self, id: Uuid) -> Result<Option<Invoice>, AppError>;
    async fn create_invoice(&self, input: NewInvoice) -> Result<Invoice, AppError>;
    async fn delete_invoice(&self, id: Uuid) -> Result<bool, AppError>;
    /// Highest purely numeric proforma number in use.
    async fn max_proforma_no(&self) -> Result<Option<i64>, AppError>;

    async fn get_company_profile(&self) -> Result<Option<CompanyProfile>, AppError>;
    /// Update the singleton profile, creating it on first save.
    async fn upsert_company_profile(
        &self,
        input: CompanyProfileInput,
    ) -> Result<CompanyProfile, AppError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError>;
}

pub type SharedStore = Arc<dyn Store>;
