//! Issuing company profile (singleton).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use sqlx::FromRow;
use uuid::Uuid;

use super::optional_text;

/// Identity, address, bank details and payment terms printed on invoices.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyProfile {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub tin_number: Option<String>,
    pub logo_url: Option<String>,
    pub bank_name: String,
    pub bank_account: String,
    pub bank_code: Option<String>,
    pub payment_terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a company profile save. Every field is optional on the wire so
/// missing required fields are reported by name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyProfileInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub tin_number: Option<String>,
    pub logo_url: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub bank_code: Option<String>,
    pub payment_terms: Option<String>,
}

fn required(field: &'static str, value: Option<String>) -> Result<String, AppError> {
    optional_text(value).ok_or_else(|| AppError::bad_request(format!("{} is required", field)))
}

impl CompanyProfileInput {
    /// Build the profile to store, keeping identity and creation time of the
    /// existing singleton when there is one.
    pub fn into_profile(
        self,
        existing: Option<&CompanyProfile>,
        now: DateTime<Utc>,
    ) -> Result<CompanyProfile, AppError> {
        Ok(CompanyProfile {
            id: existing.map(|p| p.id).unwrap_or_else(Uuid::new_v4),
            name: required("name", self.name)?,
            address: required("address", self.address)?,
            city: required("city", self.city)?,
            country: required("country", self.country)?,
            phone: required("phone", self.phone)?,
            email: required("email", self.email)?,
            website: optional_text(self.website),
            tin_number: optional_text(self.tin_number),
            logo_url: optional_text(self.logo_url),
            bank_name: required("bank_name", self.bank_name)?,
            bank_account: required("bank_account", self.bank_account)?,
            bank_code: optional_text(self.bank_code),
            payment_terms: optional_text(self.payment_terms),
            created_at: existing.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        })
    }
}
