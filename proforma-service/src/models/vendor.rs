//! Vendor model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{not_blank, optional_text};

/// A supplier of inventory items. Same shape as a client plus a business type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub tin_number: Option<String>,
    pub contact_person: Option<String>,
    pub business_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewVendor {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    #[validate(custom(function = "not_blank"))]
    pub city: String,
    #[validate(custom(function = "not_blank"))]
    pub country: String,
    #[serde(default)]
    pub tin_number: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewVendor {
    pub fn into_vendor(self, id: Uuid, created_at: DateTime<Utc>) -> Vendor {
        Vendor {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            country: self.country.trim().to_string(),
            tin_number: optional_text(self.tin_number),
            contact_person: optional_text(self.contact_person),
            business_type: optional_text(self.business_type),
            notes: optional_text(self.notes),
            created_at,
        }
    }
}
