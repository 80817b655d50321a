//! Demo mode: in-memory sample records, simulated writes.
//!
//! Used when no database is configured. Reads serve the sample data below;
//! creates validate and echo the would-be record, deletes succeed for known
//! ids, and nothing is ever persisted.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use service_core::error::AppError;
use tracing::info;
use uuid::Uuid;

use super::search;
use super::store::{DashboardStats, Store, RECENT_INVOICES};
use crate::models::{
    Client, CompanyProfile, CompanyProfileInput, Invoice, InvoiceItem, Item, NewClient,
    NewInvoice, NewItem, NewVendor, Vendor,
};

pub const SAMPLE_CLIENT_ID: Uuid = Uuid::from_u128(0x5a3f_0c1e_0000_4000_8000_0000_0000_0001);
pub const SAMPLE_VENDOR_ID: Uuid = Uuid::from_u128(0x5a3f_0c1e_0000_4000_8000_0000_0000_0002);
pub const SAMPLE_ITEM_IDS: [Uuid; 2] = [
    Uuid::from_u128(0x5a3f_0c1e_0000_4000_8000_0000_0000_0003),
    Uuid::from_u128(0x5a3f_0c1e_0000_4000_8000_0000_0000_0004),
];
pub const SAMPLE_INVOICE_ID: Uuid = Uuid::from_u128(0x5a3f_0c1e_0000_4000_8000_0000_0000_0005);
const SAMPLE_INVOICE_ITEM_IDS: [Uuid; 2] = [
    Uuid::from_u128(0x5a3f_0c1e_0000_4000_8000_0000_0000_0006),
    Uuid::from_u128(0x5a3f_0c1e_0000_4000_8000_0000_0000_0007),
];
const SAMPLE_PROFILE_ID: Uuid = Uuid::from_u128(0x5a3f_0c1e_0000_4000_8000_0000_0000_0008);

/// The issuing company shown when no profile has been saved.
pub fn sample_company_profile() -> CompanyProfile {
    let now = Utc::now();
    CompanyProfile {
        id: SAMPLE_PROFILE_ID,
        name: "MOGENT TANZANIA LIMITED".to_string(),
        address: "Plot No. 311/3/4, Block T, Taifa Rd, P.O.Box 2465".to_string(),
        city: "Dar es Salaam".to_string(),
        country: "Tanzania".to_string(),
        phone: "+255 22 286 0000".to_string(),
        email: "info@mogent.co.tz".to_string(),
        website: Some("www.mogent.co.tz".to_string()),
        tin_number: Some("125-911-374".to_string()),
        logo_url: None,
        bank_name: "CRDB Bank".to_string(),
        bank_account: "0150691988500".to_string(),
        bank_code: Some("CRDBTZTZ".to_string()),
        payment_terms: Some(
            "Payment is due within 30 days of invoice date. \
             Late payments may incur additional charges."
                .to_string(),
        ),
        created_at: now,
        updated_at: now,
    }
}

fn sample_client(now: DateTime<Utc>) -> Client {
    Client {
        id: SAMPLE_CLIENT_ID,
        name: "Hesu Investment Limited".to_string(),
        email: "info@hesu.co.tz".to_string(),
        phone: "+255 123 456 789".to_string(),
        address: "Plot No. 311/3/4, Block T, Taifa Rd, P.O.Box 2465".to_string(),
        city: "Dar es Salaam".to_string(),
        country: "Tanzania".to_string(),
        tin_number: Some("125-911-374".to_string()),
        contact_person: Some("John Doe".to_string()),
        notes: None,
        created_at: now,
    }
}

fn sample_vendor(now: DateTime<Utc>) -> Vendor {
    Vendor {
        id: SAMPLE_VENDOR_ID,
        name: "Tech Supplies Ltd".to_string(),
        email: "info@techsupplies.co.tz".to_string(),
        phone: "+255 987 654 321".to_string(),
        address: "123 Business Street, Industrial Area".to_string(),
        city: "Dar es Salaam".to_string(),
        country: "Tanzania".to_string(),
        tin_number: Some("456-789-123".to_string()),
        contact_person: Some("Jane Smith".to_string()),
        business_type: Some("Technology Supplies".to_string()),
        notes: None,
        created_at: now,
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_item(
    id: Uuid,
    name: &str,
    description: &str,
    sku: &str,
    cost: i64,
    price: i64,
    stock_quantity: i32,
    min_stock_level: i32,
    now: DateTime<Utc>,
) -> Item {
    Item {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        sku: sku.to_string(),
        category: "Office Supplies".to_string(),
        unit: "pcs".to_string(),
        price: Decimal::from(price),
        cost: Decimal::from(cost),
        stock_quantity,
        min_stock_level,
        vendor_id: Some(SAMPLE_VENDOR_ID),
        vendor_name: Some("Tech Supplies Ltd".to_string()),
        created_at: now,
    }
}

fn sample_invoice(now: DateTime<Utc>) -> Invoice {
    let line = |idx: usize, particulars: &str, price: i64| InvoiceItem {
        id: SAMPLE_INVOICE_ITEM_IDS[idx],
        invoice_id: SAMPLE_INVOICE_ID,
        sn: idx as i32 + 1,
        particulars: particulars.to_string(),
        qty: Decimal::from(2),
        unit: "pcs".to_string(),
        price_per_unit: Decimal::from(price),
        total: Decimal::from(2 * price),
    };

    Invoice {
        id: SAMPLE_INVOICE_ID,
        customer_name: "Hesu Investment Limited".to_string(),
        customer_address: "Plot No. 311/3/4, Block T, Taifa Rd, P.O.Box 2465".to_string(),
        customer_country: "Dar es Salaam, Tanzania".to_string(),
        invoice_date: NaiveDate::from_ymd_opt(2025, 1, 27).unwrap_or_default(),
        proforma_no: "152".to_string(),
        tin_no: "125-911-374".to_string(),
        subtotal: Decimal::from(840_000),
        vat: Decimal::from(151_200),
        total: Decimal::from(991_200),
        remarks: "Being sale of toners".to_string(),
        account_name: "MOGENT TANZANIA LIMITED".to_string(),
        account_no: "0150691988500".to_string(),
        created_at: now,
        items: vec![
            line(0, "Toner - 106A", 120_000),
            line(1, "Toner - 151A", 300_000),
        ],
    }
}

/// Store backed by fixed sample data.
#[derive(Debug, Clone)]
pub struct DemoStore {
    clients: Vec<Client>,
    vendors: Vec<Vendor>,
    items: Vec<Item>,
    invoices: Vec<Invoice>,
    profile: CompanyProfile,
}

impl Default for DemoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoStore {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            clients: vec![sample_client(now)],
            vendors: vec![sample_vendor(now)],
            items: vec![
                sample_item(
                    SAMPLE_ITEM_IDS[0],
                    "Toner - 106A",
                    "HP LaserJet 106A Compatible Toner Cartridge",
                    "TON-106A-001",
                    120_000,
                    150_000,
                    50,
                    10,
                    now,
                ),
                sample_item(
                    SAMPLE_ITEM_IDS[1],
                    "Toner - 151A",
                    "HP LaserJet 151A Compatible Toner Cartridge",
                    "TON-151A-001",
                    250_000,
                    300_000,
                    30,
                    5,
                    now,
                ),
            ],
            invoices: vec![sample_invoice(now)],
            profile: sample_company_profile(),
        }
    }

    pub fn clients(&self) -> Vec<Client> {
        self.clients.clone()
    }

    pub fn vendors(&self) -> Vec<Vendor> {
        self.vendors.clone()
    }

    pub fn items(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.invoices.clone()
    }
}

#[async_trait]
impl Store for DemoStore {
    fn is_demo(&self) -> bool {
        true
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let mut clients = self.clients();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn get_client(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        Ok(self.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn create_client(&self, input: NewClient) -> Result<Client, AppError> {
        let client = input.into_client(Uuid::new_v4(), Utc::now());
        info!(client_id = %client.id, "Demo mode: client not persisted");
        Ok(client)
    }

    async fn delete_client(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.clients.iter().any(|c| c.id == id))
    }

    async fn list_vendors(&self) -> Result<Vec<Vendor>, AppError> {
        let mut vendors = self.vendors();
        vendors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vendors)
    }

    async fn get_vendor(&self, id: Uuid) -> Result<Option<Vendor>, AppError> {
        Ok(self.vendors.iter().find(|v| v.id == id).cloned())
    }

    async fn create_vendor(&self, input: NewVendor) -> Result<Vendor, AppError> {
        let vendor = input.into_vendor(Uuid::new_v4(), Utc::now());
        info!(vendor_id = %vendor.id, "Demo mode: vendor not persisted");
        Ok(vendor)
    }

    async fn delete_vendor(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.vendors.iter().any(|v| v.id == id))
    }

    async fn list_items(&self) -> Result<Vec<Item>, AppError> {
        let mut items = self.items();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn create_item(&self, input: NewItem) -> Result<Item, AppError> {
        let vendor_name = input
            .vendor_id
            .and_then(|id| self.vendors.iter().find(|v| v.id == id))
            .map(|v| v.name.clone());
        let item = input.into_item(Uuid::new_v4(), vendor_name, Utc::now());
        info!(item_id = %item.id, "Demo mode: item not persisted");
        Ok(item)
    }

    async fn delete_item(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.items.iter().any(|i| i.id == id))
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        let mut invoices = self.invoices();
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invoices)
    }

    async fn get_invoice(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        Ok(self.invoices.iter().find(|i| i.id == id).cloned())
    }

    async fn create_invoice(&self, input: NewInvoice) -> Result<Invoice, AppError> {
        let invoice = input.into_invoice(Uuid::new_v4(), Utc::now());
        info!(
            invoice_id = %invoice.id,
            proforma_no = %invoice.proforma_no,
            "Demo mode: invoice not persisted"
        );
        Ok(invoice)
    }

    async fn delete_invoice(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.invoices.iter().any(|i| i.id == id))
    }

    async fn max_proforma_no(&self) -> Result<Option<i64>, AppError> {
        Ok(self
            .invoices
            .iter()
            .filter_map(|i| i.proforma_no.trim().parse::<i64>().ok())
            .max())
    }

    async fn get_company_profile(&self) -> Result<Option<CompanyProfile>, AppError> {
        Ok(Some(self.profile.clone()))
    }

    async fn upsert_company_profile(
        &self,
        input: CompanyProfileInput,
    ) -> Result<CompanyProfile, AppError> {
        input.into_profile(Some(&self.profile), Utc::now())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let recent_invoices = self
            .list_invoices()
            .await?
            .into_iter()
            .take(RECENT_INVOICES as usize)
            .collect();

        Ok(DashboardStats {
            total_clients: self.clients.len() as i64,
            total_vendors: self.vendors.len() as i64,
            total_items: self.items.len() as i64,
            total_invoices: self.invoices.len() as i64,
            invoices_this_month: search::issued_in_month(&self.invoices, Utc::now().date_naive())
                as i64,
            total_revenue: self.invoices.iter().map(|i| i.total).sum(),
            low_stock_items: search::low_stock_count(&self.items) as i64,
            inventory_value: search::inventory_value(&self.items),
            recent_invoices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::totals;

    #[test]
    fn sample_invoice_satisfies_total_invariants() {
        let invoice = sample_invoice(Utc::now());
        for line in &invoice.items {
            assert_eq!(Some(line.total), totals::line_total(line.qty, line.price_per_unit));
        }
        let computed = totals::compute(invoice.items.iter().map(|l| l.total)).unwrap();
        assert_eq!(computed.subtotal, invoice.subtotal);
        assert_eq!(computed.vat, invoice.vat);
        assert_eq!(computed.total, invoice.total);
    }

    #[tokio::test]
    async fn writes_are_not_persisted() {
        let store = DemoStore::new();
        let input: NewClient = serde_json::from_value(serde_json::json!({
            "name": "Tech Solutions Ltd",
            "email": "info@techsolutions.co.ke",
            "phone": "+254 700 000 000",
            "address": "123 Innovation Street",
            "city": "Nairobi",
            "country": "Kenya"
        }))
        .unwrap();

        let created = store.create_client(input).await.unwrap();
        assert_eq!(created.name, "Tech Solutions Ltd");
        assert!(store.get_client(created.id).await.unwrap().is_none());
        assert_eq!(store.list_clients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deletes_report_known_ids_only() {
        let store = DemoStore::new();
        assert!(store.delete_invoice(SAMPLE_INVOICE_ID).await.unwrap());
        assert!(!store.delete_invoice(Uuid::new_v4()).await.unwrap());
        assert!(store.get_invoice(SAMPLE_INVOICE_ID).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn created_item_resolves_vendor_name() {
        let store = DemoStore::new();
        let input: NewItem = serde_json::from_value(serde_json::json!({
            "name": "Toner - 85A",
            "sku": "TON-85A-001",
            "category": "Office Supplies",
            "price": 90000,
            "cost": 70000,
            "vendor_id": SAMPLE_VENDOR_ID
        }))
        .unwrap();

        let item = store.create_item(input).await.unwrap();
        assert_eq!(item.vendor_name.as_deref(), Some("Tech Supplies Ltd"));
    }

    #[tokio::test]
    async fn dashboard_summarises_samples() {
        let stats = DemoStore::new().dashboard_stats().await.unwrap();
        assert_eq!(stats.total_clients, 1);
        assert_eq!(stats.total_vendors, 1);
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.total_invoices, 1);
        let expected = search::issued_in_month(&DemoStore::new().invoices(), Utc::now().date_naive());
        assert_eq!(stats.invoices_this_month, expected as i64);
        assert_eq!(stats.total_revenue, Decimal::from(991_200));
        assert_eq!(stats.low_stock_items, 0);
        assert_eq!(stats.recent_invoices.len(), 1);
    }

    #[tokio::test]
    async fn highest_proforma_number_is_reported() {
        assert_eq!(DemoStore::new().max_proforma_no().await.unwrap(), Some(152));
    }
}
