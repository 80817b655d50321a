//! PostgreSQL store for proforma-service.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::metrics::{DB_QUERY_DURATION, ERRORS_TOTAL};
use super::search;
use super::store::{DashboardStats, Store, RECENT_INVOICES};
use crate::models::{
    Client, CompanyProfile, CompanyProfileInput, Invoice, InvoiceItem, Item, NewClient,
    NewInvoice, NewItem, NewVendor, Vendor,
};

const ITEM_COLUMNS: &str = "i.id, i.name, i.description, i.sku, i.category, i.unit, i.price, \
     i.cost, i.stock_quantity, i.min_stock_level, i.vendor_id, v.name AS vendor_name, i.created_at";

/// Count the failure and convert it into an `AppError`.
fn query_failed(operation: &str, err: sqlx::Error) -> AppError {
    ERRORS_TOTAL.with_label_values(&["database"]).inc();
    warn!(operation = operation, error = %err, "Database query failed");
    AppError::from(err)
}

#[derive(FromRow)]
struct StatsRow {
    total_clients: i64,
    total_vendors: i64,
    total_items: i64,
    total_invoices: i64,
    invoices_this_month: i64,
    total_revenue: Decimal,
    low_stock_items: i64,
    inventory_value: Decimal,
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "proforma-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Attach lines (ordered by serial number) to each invoice.
    async fn attach_items(&self, invoices: &mut [Invoice]) -> Result<(), AppError> {
        if invoices.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = invoices.iter().map(|i| i.id).collect();
        let lines = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT id, invoice_id, sn, particulars, qty, unit, price_per_unit, total
            FROM invoice_items
            WHERE invoice_id = ANY($1)
            ORDER BY invoice_id, sn
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("load_invoice_items", e))?;

        let mut by_invoice: HashMap<Uuid, Vec<InvoiceItem>> = HashMap::new();
        for line in lines {
            by_invoice.entry(line.invoice_id).or_default().push(line);
        }
        for invoice in invoices.iter_mut() {
            invoice.items = by_invoice.remove(&invoice.id).unwrap_or_default();
        }

        Ok(())
    }

    async fn delete_by_id(&self, table: &str, id: Uuid) -> Result<bool, AppError> {
        let operation = format!("delete_{}", table);
        let timer = DB_QUERY_DURATION
            .with_label_values(&[operation.as_str()])
            .start_timer();

        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed(&operation, e))?;

        timer.observe_duration();

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(table = table, id = %id, "Record deleted");
        }
        Ok(deleted)
    }
}

#[async_trait]
impl Store for Database {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Clients
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_clients"])
            .start_timer();

        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, address, city, country, tin_number, contact_person, notes, created_at
            FROM clients
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("list_clients", e))?;

        timer.observe_duration();
        Ok(clients)
    }

    #[instrument(skip(self), fields(client_id = %id))]
    async fn get_client(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_client"])
            .start_timer();

        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, address, city, country, tin_number, contact_person, notes, created_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("get_client", e))?;

        timer.observe_duration();
        Ok(client)
    }

    #[instrument(skip(self, input))]
    async fn create_client(&self, input: NewClient) -> Result<Client, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_client"])
            .start_timer();

        let client = input.into_client(Uuid::new_v4(), Utc::now());
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, email, phone, address, city, country, tin_number, contact_person, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, name, email, phone, address, city, country, tin_number, contact_person, notes, created_at
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.city)
        .bind(&client.country)
        .bind(&client.tin_number)
        .bind(&client.contact_person)
        .bind(&client.notes)
        .bind(client.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("create_client", e))?;

        timer.observe_duration();

        info!(client_id = %client.id, name = %client.name, "Client created");
        Ok(client)
    }

    #[instrument(skip(self), fields(client_id = %id))]
    async fn delete_client(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("clients", id).await
    }

    // -------------------------------------------------------------------------
    // Vendors
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn list_vendors(&self) -> Result<Vec<Vendor>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_vendors"])
            .start_timer();

        let vendors = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT id, name, email, phone, address, city, country, tin_number, contact_person,
                   business_type, notes, created_at
            FROM vendors
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("list_vendors", e))?;

        timer.observe_duration();
        Ok(vendors)
    }

    #[instrument(skip(self), fields(vendor_id = %id))]
    async fn get_vendor(&self, id: Uuid) -> Result<Option<Vendor>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_vendor"])
            .start_timer();

        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT id, name, email, phone, address, city, country, tin_number, contact_person,
                   business_type, notes, created_at
            FROM vendors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("get_vendor", e))?;

        timer.observe_duration();
        Ok(vendor)
    }

    #[instrument(skip(self, input))]
    async fn create_vendor(&self, input: NewVendor) -> Result<Vendor, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_vendor"])
            .start_timer();

        let vendor = input.into_vendor(Uuid::new_v4(), Utc::now());
        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            INSERT INTO vendors (id, name, email, phone, address, city, country, tin_number,
                                 contact_person, business_type, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, name, email, phone, address, city, country, tin_number, contact_person,
                      business_type, notes, created_at
            "#,
        )
        .bind(vendor.id)
        .bind(&vendor.name)
        .bind(&vendor.email)
        .bind(&vendor.phone)
        .bind(&vendor.address)
        .bind(&vendor.city)
        .bind(&vendor.country)
        .bind(&vendor.tin_number)
        .bind(&vendor.contact_person)
        .bind(&vendor.business_type)
        .bind(&vendor.notes)
        .bind(vendor.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("create_vendor", e))?;

        timer.observe_duration();

        info!(vendor_id = %vendor.id, name = %vendor.name, "Vendor created");
        Ok(vendor)
    }

    #[instrument(skip(self), fields(vendor_id = %id))]
    async fn delete_vendor(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("vendors", id).await
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn list_items(&self) -> Result<Vec<Item>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_items"])
            .start_timer();

        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items i LEFT JOIN vendors v ON v.id = i.vendor_id ORDER BY i.name ASC",
            ITEM_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("list_items", e))?;

        timer.observe_duration();
        Ok(items)
    }

    #[instrument(skip(self, input))]
    async fn create_item(&self, input: NewItem) -> Result<Item, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_item"])
            .start_timer();

        let item = input.into_item(Uuid::new_v4(), None, Utc::now());
        let item = sqlx::query_as::<_, Item>(&format!(
            r#"
            WITH i AS (
                INSERT INTO items (id, name, description, sku, category, unit, price, cost,
                                   stock_quantity, min_stock_level, vendor_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING *
            )
            SELECT {} FROM i LEFT JOIN vendors v ON v.id = i.vendor_id
            "#,
            ITEM_COLUMNS
        ))
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.sku)
        .bind(&item.category)
        .bind(&item.unit)
        .bind(item.price)
        .bind(item.cost)
        .bind(item.stock_quantity)
        .bind(item.min_stock_level)
        .bind(item.vendor_id)
        .bind(item.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("create_item", e))?;

        timer.observe_duration();

        info!(item_id = %item.id, sku = %item.sku, "Item created");
        Ok(item)
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn delete_item(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("items", id).await
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_invoices"])
            .start_timer();

        let mut invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, customer_name, customer_address, customer_country, invoice_date, proforma_no,
                   tin_no, subtotal, vat, total, remarks, account_name, account_no, created_at
            FROM invoices
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("list_invoices", e))?;

        self.attach_items(&mut invoices).await?;

        timer.observe_duration();
        Ok(invoices)
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn get_invoice(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_invoice"])
            .start_timer();

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, customer_name, customer_address, customer_country, invoice_date, proforma_no,
                   tin_no, subtotal, vat, total, remarks, account_name, account_no, created_at
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("get_invoice", e))?;

        let invoice = match invoice {
            Some(invoice) => {
                let mut found = [invoice];
                self.attach_items(&mut found).await?;
                let [invoice] = found;
                Some(invoice)
            }
            None => None,
        };

        timer.observe_duration();
        Ok(invoice)
    }

    #[instrument(skip(self, input), fields(proforma_no = %input.proforma_no))]
    async fn create_invoice(&self, input: NewInvoice) -> Result<Invoice, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_invoice"])
            .start_timer();

        let invoice = input.into_invoice(Uuid::new_v4(), Utc::now());

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_failed("create_invoice", e))?;

        sqlx::query(
            r#"
            INSERT INTO invoices (id, customer_name, customer_address, customer_country, invoice_date,
                                  proforma_no, tin_no, subtotal, vat, total, remarks, account_name,
                                  account_no, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(invoice.id)
        .bind(&invoice.customer_name)
        .bind(&invoice.customer_address)
        .bind(&invoice.customer_country)
        .bind(invoice.invoice_date)
        .bind(&invoice.proforma_no)
        .bind(&invoice.tin_no)
        .bind(invoice.subtotal)
        .bind(invoice.vat)
        .bind(invoice.total)
        .bind(&invoice.remarks)
        .bind(&invoice.account_name)
        .bind(&invoice.account_no)
        .bind(invoice.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| query_failed("create_invoice", e))?;

        for line in &invoice.items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (id, invoice_id, sn, particulars, qty, unit, price_per_unit, total)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(line.id)
            .bind(line.invoice_id)
            .bind(line.sn)
            .bind(&line.particulars)
            .bind(line.qty)
            .bind(&line.unit)
            .bind(line.price_per_unit)
            .bind(line.total)
            .execute(&mut *tx)
            .await
            .map_err(|e| query_failed("create_invoice_item", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| query_failed("create_invoice", e))?;

        timer.observe_duration();

        info!(
            invoice_id = %invoice.id,
            proforma_no = %invoice.proforma_no,
            total = %invoice.total,
            lines = invoice.items.len(),
            "Invoice created"
        );
        Ok(invoice)
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn delete_invoice(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("invoices", id).await
    }

    #[instrument(skip(self))]
    async fn max_proforma_no(&self) -> Result<Option<i64>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["max_proforma_no"])
            .start_timer();

        let max: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT MAX(TRIM(proforma_no)::BIGINT)
            FROM invoices
            WHERE TRIM(proforma_no) ~ '^[0-9]{1,18}$'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("max_proforma_no", e))?;

        timer.observe_duration();
        Ok(max)
    }

    // -------------------------------------------------------------------------
    // Company profile
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn get_company_profile(&self) -> Result<Option<CompanyProfile>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_company_profile"])
            .start_timer();

        let profile = sqlx::query_as::<_, CompanyProfile>(
            r#"
            SELECT id, name, address, city, country, phone, email, website, tin_number, logo_url,
                   bank_name, bank_account, bank_code, payment_terms, created_at, updated_at
            FROM company_profile
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("get_company_profile", e))?;

        timer.observe_duration();
        Ok(profile)
    }

    #[instrument(skip(self, input))]
    async fn upsert_company_profile(
        &self,
        input: CompanyProfileInput,
    ) -> Result<CompanyProfile, AppError> {
        let existing = self.get_company_profile().await?;
        let profile = input.into_profile(existing.as_ref(), Utc::now())?;

        let timer = DB_QUERY_DURATION
            .with_label_values(&["upsert_company_profile"])
            .start_timer();

        let profile = sqlx::query_as::<_, CompanyProfile>(
            r#"
            INSERT INTO company_profile (id, name, address, city, country, phone, email, website,
                                         tin_number, logo_url, bank_name, bank_account, bank_code,
                                         payment_terms, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                address = EXCLUDED.address,
                city = EXCLUDED.city,
                country = EXCLUDED.country,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                website = EXCLUDED.website,
                tin_number = EXCLUDED.tin_number,
                logo_url = EXCLUDED.logo_url,
                bank_name = EXCLUDED.bank_name,
                bank_account = EXCLUDED.bank_account,
                bank_code = EXCLUDED.bank_code,
                payment_terms = EXCLUDED.payment_terms,
                updated_at = EXCLUDED.updated_at
            RETURNING id, name, address, city, country, phone, email, website, tin_number, logo_url,
                      bank_name, bank_account, bank_code, payment_terms, created_at, updated_at
            "#,
        )
        .bind(profile.id)
        .bind(&profile.name)
        .bind(&profile.address)
        .bind(&profile.city)
        .bind(&profile.country)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.website)
        .bind(&profile.tin_number)
        .bind(&profile.logo_url)
        .bind(&profile.bank_name)
        .bind(&profile.bank_account)
        .bind(&profile.bank_code)
        .bind(&profile.payment_terms)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("upsert_company_profile", e))?;

        timer.observe_duration();

        info!(name = %profile.name, created = existing.is_none(), "Company profile saved");
        Ok(profile)
    }

    // -------------------------------------------------------------------------
    // Dashboard
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["dashboard_stats"])
            .start_timer();
        let (month_start, month_end) = search::month_bounds(Utc::now().date_naive());

        let stats = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM clients) AS total_clients,
                (SELECT COUNT(*) FROM vendors) AS total_vendors,
                (SELECT COUNT(*) FROM items) AS total_items,
                (SELECT COUNT(*) FROM invoices) AS total_invoices,
                (SELECT COUNT(*) FROM invoices
                 WHERE invoice_date >= $1 AND invoice_date < $2) AS invoices_this_month,
                (SELECT COALESCE(SUM(total), 0) FROM invoices) AS total_revenue,
                (SELECT COUNT(*) FROM items WHERE stock_quantity <= min_stock_level) AS low_stock_items,
                (SELECT COALESCE(SUM(stock_quantity * cost), 0) FROM items) AS inventory_value
            "#,
        )
        .bind(month_start)
        .bind(month_end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("dashboard_stats", e))?;

        let mut recent_invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, customer_name, customer_address, customer_country, invoice_date, proforma_no,
                   tin_no, subtotal, vat, total, remarks, account_name, account_no, created_at
            FROM invoices
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(RECENT_INVOICES)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("dashboard_stats", e))?;

        self.attach_items(&mut recent_invoices).await?;

        timer.observe_duration();

        Ok(DashboardStats {
            total_clients: stats.total_clients,
            total_vendors: stats.total_vendors,
            total_items: stats.total_items,
            total_invoices: stats.total_invoices,
            invoices_this_month: stats.invoices_this_month,
            total_revenue: stats.total_revenue,
            low_stock_items: stats.low_stock_items,
            inventory_value: stats.inventory_value,
            recent_invoices,
        })
    }
}
