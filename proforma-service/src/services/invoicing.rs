//! Turning a submitted invoice into a stored one.

use chrono::NaiveDate;
use service_core::error::AppError;

use super::demo::sample_company_profile;
use super::store::Store;
use super::totals;
use crate::dtos::{CreateInvoiceRequest, InvoiceLineInput};
use crate::models::{optional_text as text, Client, CompanyProfile, NewInvoice, NewInvoiceItem};

/// Proforma number following the highest numeric one in use.
pub fn next_proforma_no(max_in_use: Option<i64>) -> String {
    (max_in_use.unwrap_or(0).max(0) + 1).to_string()
}

/// The saved company profile, or the sample one when none has been saved.
pub async fn effective_company_profile(store: &dyn Store) -> Result<CompanyProfile, AppError> {
    Ok(store
        .get_company_profile()
        .await?
        .unwrap_or_else(sample_company_profile))
}

const AMOUNTS_TOO_LARGE: &str = "Invoice amounts are too large";

/// Drop unusable lines, number the rest 1..n and compute line totals.
///
/// Quantity and price are rounded to their stored precision first, so the
/// stored line total is exactly the stored `qty × price_per_unit`.
fn prepare_lines(lines: Vec<InvoiceLineInput>) -> Result<Vec<NewInvoiceItem>, AppError> {
    lines
        .into_iter()
        .map(|line| InvoiceLineInput {
            qty: totals::round_qty(line.qty),
            price_per_unit: totals::round_price(line.price_per_unit),
            ..line
        })
        .filter(|line| totals::is_valid_line(&line.particulars, line.qty, line.price_per_unit))
        .enumerate()
        .map(|(idx, line)| {
            if !totals::is_within_bounds(line.qty, line.price_per_unit) {
                return Err(AppError::bad_request(AMOUNTS_TOO_LARGE));
            }
            let total = totals::line_total(line.qty, line.price_per_unit)
                .ok_or_else(|| AppError::bad_request(AMOUNTS_TOO_LARGE))?;
            let unit = line.unit.trim();
            Ok(NewInvoiceItem {
                sn: idx as i32 + 1,
                particulars: line.particulars.trim().to_string(),
                qty: line.qty,
                unit: if unit.is_empty() { "pcs".to_string() } else { unit.to_string() },
                price_per_unit: line.price_per_unit,
                total,
            })
        })
        .collect()
}

/// Build the invoice to store from a request.
///
/// The customer snapshot comes from `client` when given. Bank account fields
/// fall back to the company profile. Totals are always recomputed.
pub fn assemble(
    request: CreateInvoiceRequest,
    client: Option<&Client>,
    company: &CompanyProfile,
    proforma_no: String,
    today: NaiveDate,
) -> Result<NewInvoice, AppError> {
    let (customer_name, customer_address, customer_country, tin_no) = match client {
        Some(client) => (
            client.name.clone(),
            client.address.clone(),
            client.country.clone(),
            client
                .tin_number
                .clone()
                .or_else(|| text(request.tin_no.clone()))
                .unwrap_or_default(),
        ),
        None => (
            text(request.customer_name).ok_or_else(|| AppError::bad_request("Please select a client"))?,
            text(request.customer_address).unwrap_or_default(),
            text(request.customer_country).unwrap_or_default(),
            text(request.tin_no).unwrap_or_default(),
        ),
    };

    let items = prepare_lines(request.items)?;
    if items.is_empty() {
        return Err(AppError::bad_request("Please add at least one valid item"));
    }

    let totals = totals::compute(items.iter().map(|line| line.total))
        .ok_or_else(|| AppError::bad_request(AMOUNTS_TOO_LARGE))?;

    Ok(NewInvoice {
        customer_name,
        customer_address,
        customer_country,
        invoice_date: request.invoice_date.unwrap_or(today),
        proforma_no,
        tin_no,
        subtotal: totals.subtotal,
        vat: totals.vat,
        total: totals.total,
        remarks: text(request.remarks).unwrap_or_default(),
        account_name: text(request.account_name).unwrap_or_else(|| company.name.clone()),
        account_no: text(request.account_no).unwrap_or_else(|| company.bank_account.clone()),
        items,
    })
}

/// Resolve the client, proforma number and company defaults, then assemble.
pub async fn prepare_invoice(
    store: &dyn Store,
    mut request: CreateInvoiceRequest,
    today: NaiveDate,
) -> Result<NewInvoice, AppError> {
    let client = match request.client_id {
        Some(id) => Some(
            store
                .get_client(id)
                .await?
                .ok_or_else(|| AppError::not_found("Client not found"))?,
        ),
        None => None,
    };

    let proforma_no = match text(request.proforma_no.take()) {
        Some(no) => no,
        None => next_proforma_no(store.max_proforma_no().await?),
    };

    let company = effective_company_profile(store).await?;

    assemble(request, client.as_ref(), &company, proforma_no, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::demo::{DemoStore, SAMPLE_CLIENT_ID};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn line(particulars: &str, qty: i64, price: i64) -> InvoiceLineInput {
        InvoiceLineInput {
            particulars: particulars.to_string(),
            qty: Decimal::from(qty),
            unit: "pcs".to_string(),
            price_per_unit: Decimal::from(price),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    #[test]
    fn next_number_follows_highest() {
        assert_eq!(next_proforma_no(None), "1");
        assert_eq!(next_proforma_no(Some(152)), "153");
        assert_eq!(next_proforma_no(Some(-4)), "1");
    }

    #[test]
    fn invalid_lines_are_dropped_and_renumbered() {
        let request = CreateInvoiceRequest {
            customer_name: Some("Walk-in Customer".into()),
            items: vec![
                line("", 1, 100),
                line("Toner - 106A", 2, 120000),
                line("Free sample", 1, 0),
                line("Toner - 151A", 2, 300000),
            ],
            ..Default::default()
        };

        let invoice = assemble(request, None, &sample_company_profile(), "7".into(), today())
            .unwrap();

        let sns: Vec<i32> = invoice.items.iter().map(|l| l.sn).collect();
        assert_eq!(sns, vec![1, 2]);
        assert_eq!(invoice.items[1].particulars, "Toner - 151A");
        assert_eq!(invoice.subtotal, Decimal::from(840000));
        assert_eq!(invoice.vat, Decimal::from(151200));
        assert_eq!(invoice.total, Decimal::from(991200));
        assert_eq!(invoice.invoice_date, today());
    }

    #[test]
    fn no_valid_lines_is_rejected() {
        let request = CreateInvoiceRequest {
            customer_name: Some("Walk-in Customer".into()),
            items: vec![line("Toner", 0, 100)],
            ..Default::default()
        };
        let err = assemble(request, None, &sample_company_profile(), "1".into(), today())
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Please add at least one valid item");
    }

    #[test]
    fn customer_is_required_without_client() {
        let request = CreateInvoiceRequest {
            items: vec![line("Toner", 1, 100)],
            ..Default::default()
        };
        let err = assemble(request, None, &sample_company_profile(), "1".into(), today())
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Please select a client");
    }

    #[test]
    fn bank_fields_default_to_company_profile() {
        let request = CreateInvoiceRequest {
            customer_name: Some("Walk-in Customer".into()),
            items: vec![line("Toner", 1, 100)],
            account_no: Some("   ".into()),
            ..Default::default()
        };
        let company = sample_company_profile();
        let invoice = assemble(request, None, &company, "1".into(), today()).unwrap();
        assert_eq!(invoice.account_name, company.name);
        assert_eq!(invoice.account_no, company.bank_account);
    }

    fn walk_in(items: Vec<InvoiceLineInput>) -> CreateInvoiceRequest {
        CreateInvoiceRequest {
            customer_name: Some("Walk-in Customer".into()),
            items,
            ..Default::default()
        }
    }

    #[test]
    fn stored_line_values_reproduce_the_line_total() {
        let request = walk_in(vec![InvoiceLineInput {
            particulars: "Paper - A4 ream".to_string(),
            qty: Decimal::new(15, 1),
            unit: "box".to_string(),
            price_per_unit: Decimal::new(33335, 3),
        }]);

        let invoice = assemble(request, None, &sample_company_profile(), "1".into(), today())
            .unwrap();

        let line = &invoice.items[0];
        assert_eq!(line.qty, Decimal::new(15, 1));
        assert_eq!(line.price_per_unit, Decimal::new(3334, 2));
        assert_eq!(line.total, Decimal::new(5001, 2));
        assert_eq!(line.total, line.qty * line.price_per_unit);
        assert_eq!(invoice.subtotal, Decimal::new(5001, 2));
    }

    #[test]
    fn quantity_rounding_to_zero_drops_the_line() {
        let request = walk_in(vec![
            InvoiceLineInput {
                particulars: "Toner".to_string(),
                qty: Decimal::new(4, 4),
                unit: "pcs".to_string(),
                price_per_unit: Decimal::from(100),
            },
            line("Toner - 106A", 1, 150000),
        ]);

        let invoice = assemble(request, None, &sample_company_profile(), "1".into(), today())
            .unwrap();
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.items[0].sn, 1);
    }

    #[test]
    fn oversized_lines_are_rejected() {
        let huge = 1_000_000_000_000_000;
        let err = assemble(
            walk_in(vec![line("Toner", huge, huge)]),
            None,
            &sample_company_profile(),
            "1".into(),
            today(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Invoice amounts are too large");
    }

    #[test]
    fn line_total_beyond_storage_is_rejected() {
        // Each factor fits its column but the product does not.
        let qty = 1_000_000_000_000;
        let price = 100_000_000_000;
        let err = assemble(
            walk_in(vec![line("Toner", qty, price)]),
            None,
            &sample_company_profile(),
            "1".into(),
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn invoice_total_beyond_storage_is_rejected() {
        // Two lines of 6e15 fit individually; their total with VAT does not.
        let lines = vec![
            line("Toner - 106A", 60_000, 100_000_000_000),
            line("Toner - 151A", 60_000, 100_000_000_000),
        ];
        let err = assemble(walk_in(lines), None, &sample_company_profile(), "1".into(), today())
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Invoice amounts are too large");
    }

    #[tokio::test]
    async fn client_snapshot_and_next_number_come_from_store() {
        let store = DemoStore::new();
        let request = CreateInvoiceRequest {
            client_id: Some(SAMPLE_CLIENT_ID),
            customer_name: Some("Ignored".into()),
            items: vec![line("Toner - 106A", 1, 150000)],
            ..Default::default()
        };

        let invoice = prepare_invoice(&store, request, today()).await.unwrap();
        assert_eq!(invoice.customer_name, "Hesu Investment Limited");
        assert_eq!(invoice.customer_country, "Tanzania");
        assert_eq!(invoice.tin_no, "125-911-374");
        assert_eq!(invoice.proforma_no, "153");
    }

    #[tokio::test]
    async fn unknown_client_is_not_found() {
        let store = DemoStore::new();
        let request = CreateInvoiceRequest {
            client_id: Some(Uuid::new_v4()),
            items: vec![line("Toner", 1, 100)],
            ..Default::default()
        };
        let err = prepare_invoice(&store, request, today()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
