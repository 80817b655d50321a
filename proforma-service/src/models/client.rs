//! Client model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{not_blank, optional_text};

/// A customer that invoices are addressed to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub tin_number: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewClient {
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
    pub notes: Option<String>,
}

impl NewClient {
    pub fn into_client(self, id: Uuid, created_at: DateTime<Utc>) -> Client {
        Client {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            country: self.country.trim().to_string(),
            tin_number: optional_text(self.tin_number),
            contact_person: optional_text(self.contact_person),
            notes: optional_text(self.notes),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewClient {
        NewClient {
            name: "Hesu Investment Limited".into(),
            email: "info@hesu.co.tz".into(),
            phone: "+255 123 456 789".into(),
            address: "Plot No. 311/3/4, Block T, Taifa Rd".into(),
            city: "Dar es Salaam".into(),
            country: "Tanzania".into(),
            tin_number: Some(" ".into()),
            contact_person: Some("John Doe".into()),
            notes: None,
        }
    }

    #[test]
    fn valid_client_passes_validation() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn invalid_email_and_blank_name_fail() {
        let mut bad = input();
        bad.email = "not-an-email".into();
        bad.name = "  ".into();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let client = input().into_client(Uuid::new_v4(), Utc::now());
        assert_eq!(client.tin_number, None);
        assert_eq!(client.contact_person.as_deref(), Some("John Doe"));
    }
}
