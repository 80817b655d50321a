//! Printable proforma invoice page.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::models::{CompanyProfile, Invoice, InvoiceItem};
use crate::services::format::{format_currency, format_date, format_quantity};
use crate::services::invoicing::effective_company_profile;
use crate::services::totals::VAT_RATE;
use crate::AppState;

/// One table row, already formatted for display.
pub struct PrintLine {
    pub sn: i32,
    pub particulars: String,
    pub qty: String,
    pub unit: String,
    pub price_per_unit: String,
    pub total: String,
}

impl From<&InvoiceItem> for PrintLine {
    fn from(line: &InvoiceItem) -> Self {
        Self {
            sn: line.sn,
            particulars: line.particulars.clone(),
            qty: format_quantity(line.qty),
            unit: line.unit.clone(),
            price_per_unit: format_currency(line.price_per_unit),
            total: format_currency(line.total),
        }
    }
}

#[derive(Template)]
#[template(path = "invoice.html")]
pub struct InvoiceTemplate {
    pub company: CompanyProfile,
    pub invoice: Invoice,
    pub invoice_date: String,
    pub lines: Vec<PrintLine>,
    pub vat_percent: String,
    pub subtotal: String,
    pub vat: String,
    pub total: String,
}

impl InvoiceTemplate {
    pub fn new(company: CompanyProfile, invoice: Invoice) -> Self {
        Self {
            invoice_date: format_date(invoice.invoice_date),
            lines: invoice.items.iter().map(PrintLine::from).collect(),
            vat_percent: (VAT_RATE * rust_decimal::Decimal::ONE_HUNDRED)
                .normalize()
                .to_string(),
            subtotal: format_currency(invoice.subtotal),
            vat: format_currency(invoice.vat),
            total: format_currency(invoice.total),
            company,
            invoice,
        }
    }
}

/// Shows the stored amounts; nothing is recomputed for display.
///
/// GET /api/invoices/:id/print
pub async fn print_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state
        .store
        .get_invoice(id)
        .await?
        .ok_or_else(|| AppError::not_found("Invoice not found"))?;
    let company = effective_company_profile(state.store.as_ref()).await?;

    Ok(InvoiceTemplate::new(company, invoice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::demo::{sample_company_profile, DemoStore};

    #[test]
    fn renders_company_header_lines_and_totals() {
        let invoice = DemoStore::new().invoices().remove(0);
        let html = InvoiceTemplate::new(sample_company_profile(), invoice)
            .render()
            .unwrap();

        assert!(html.contains("MOGENT TANZANIA LIMITED"));
        assert!(html.contains("PROFORMA INVOICE"));
        assert!(html.contains("Toner - 151A"));
        assert!(html.contains("TZS 840,000.00"));
        assert!(html.contains("VAT (18%)"));
        assert!(html.contains("TZS 991,200.00"));
        assert!(html.contains("0150691988500"));
    }
}
