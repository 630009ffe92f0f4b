//! Database models for customers.

use crate::types::CustomerId;
use serde::{Deserialize, Serialize};

/// A customer of the restaurant.
///
/// `id` is `None` until the customer has been saved; [`crate::db::handlers::Customers::save`]
/// fills it in with the generated ID on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: String,
}

impl Customer {
    /// Build an unsaved customer. Missing notes are stored as an empty string.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, phone: Option<String>, notes: Option<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone,
            notes: notes.unwrap_or_default(),
        }
    }

    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl From<CustomerDBResponse> for Customer {
    fn from(db: CustomerDBResponse) -> Self {
        Self {
            id: Some(db.id),
            first_name: db.first_name,
            last_name: db.last_name,
            phone: db.phone,
            notes: db.notes,
        }
    }
}

/// Database request for creating a new customer
#[derive(Debug, Clone)]
pub struct CustomerCreateDBRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: String,
}

impl From<&Customer> for CustomerCreateDBRequest {
    fn from(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            phone: customer.phone.clone(),
            notes: customer.notes.clone(),
        }
    }
}

/// Database request for updating a customer.
///
/// Every column is overwritten, matching a save of the whole record.
#[derive(Debug, Clone)]
pub struct CustomerUpdateDBRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: String,
}

impl From<&Customer> for CustomerUpdateDBRequest {
    fn from(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            phone: customer.phone.clone(),
            notes: customer.notes.clone(),
        }
    }
}

/// Database response for a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDBResponse {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: String,
}

impl CustomerDBResponse {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// A customer together with how many reservations they hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCustomer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub reservation_count: i64,
}

impl TopCustomer {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_with_single_space() {
        let customer = Customer::new("Anna", "Smith", None, None);
        assert_eq!(customer.full_name(), "Anna Smith");
    }

    #[test]
    fn test_full_name_with_empty_parts() {
        let cases = [("", "", " "), ("Anna", "", "Anna "), ("", "Smith", " Smith"), (" ", " ", "   ")];
        for (first, last, expected) in cases {
            let customer = Customer::new(first, last, None, None);
            assert_eq!(customer.full_name(), expected, "first={first:?} last={last:?}");
            assert_eq!(customer.full_name(), format!("{} {}", first, last));
        }
    }

    #[test]
    fn test_full_name_agrees_across_record_types() {
        let db = CustomerDBResponse {
            id: 7,
            first_name: "Jo".to_string(),
            last_name: "Lee".to_string(),
            phone: None,
            notes: String::new(),
        };
        let top = TopCustomer {
            id: 7,
            first_name: "Jo".to_string(),
            last_name: "Lee".to_string(),
            reservation_count: 3,
        };
        assert_eq!(db.full_name(), "Jo Lee");
        assert_eq!(top.full_name(), db.full_name());
        assert_eq!(Customer::from(db).full_name(), "Jo Lee");
    }

    #[test]
    fn test_new_customer_is_unsaved_with_empty_notes() {
        let customer = Customer::new("Anna", "Smith", Some("555-0100".to_string()), None);
        assert!(!customer.is_persisted());
        assert_eq!(customer.notes, "");
        assert_eq!(customer.phone.as_deref(), Some("555-0100"));
    }
}
