//! Proforma invoice model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Proforma invoice with its customer snapshot and ordered lines.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_country: String,
    pub invoice_date: NaiveDate,
    pub proforma_no: String,
    pub tin_no: String,
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
    pub remarks: String,
    pub account_name: String,
    pub account_no: String,
    pub created_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

/// One line of an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceItem {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub sn: i32,
    pub particulars: String,
    pub qty: Decimal,
    pub unit: String,
    pub price_per_unit: Decimal,
    pub total: Decimal,
}

/// A fully prepared invoice: snapshot taken, lines numbered, totals computed.
#[derive(Debug, Clone, Serialize)]
pub struct NewInvoice {
    pub customer_name: String,
    pub customer_address: String,
    pub customer_country: String,
    pub invoice_date: NaiveDate,
    pub proforma_no: String,
    pub tin_no: String,
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
    pub remarks: String,
    pub account_name: String,
    pub account_no: String,
    pub items: Vec<NewInvoiceItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewInvoiceItem {
    pub sn: i32,
    pub particulars: String,
    pub qty: Decimal,
    pub unit: String,
    pub price_per_unit: Decimal,
    pub total: Decimal,
}

impl NewInvoice {
    pub fn into_invoice(self, id: Uuid, created_at: DateTime<Utc>) -> Invoice {
        let items = self
            .items
            .into_iter()
            .map(|line| InvoiceItem {
                id: Uuid::new_v4(),
                invoice_id: id,
                sn: line.sn,
                particulars: line.particulars,
                qty: line.qty,
                unit: line.unit,
                price_per_unit: line.price_per_unit,
                total: line.total,
            })
            .collect();

        Invoice {
            id,
            customer_name: self.customer_name,
            customer_address: self.customer_address,
            customer_country: self.customer_country,
            invoice_date: self.invoice_date,
            proforma_no: self.proforma_no,
            tin_no: self.tin_no,
            subtotal: self.subtotal,
            vat: self.vat,
            total: self.total,
            remarks: self.remarks,
            account_name: self.account_name,
            account_no: self.account_no,
            created_at,
            items,
        }
    }
}
