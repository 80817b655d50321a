//! Domain models for proforma-service.

mod client;
mod company_profile;
mod invoice;
mod item;
mod vendor;

pub use client::{Client, NewClient};
pub use company_profile::{CompanyProfile, CompanyProfileInput};
pub use invoice::{Invoice, InvoiceItem, NewInvoice, NewInvoiceItem};
pub use item::{Item, NewItem};
pub use vendor::{NewVendor, Vendor};

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::services::totals::MAX_PRICE;

/// Rejects empty and whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// A price or cost: not negative and no wider than a stored unit price.
pub(crate) fn money_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative"));
    }
    if *value > MAX_PRICE {
        return Err(ValidationError::new("too_large"));
    }
    Ok(())
}

/// Collapse blank optional text to `None` and trim the rest.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
