//! HR staff model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an HR staff member. HR records are administered by the Manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hr {
    /// Unique identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Login password.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Ten-digit contact number.
    pub contact_number: String,
    /// Current salary.
    pub salary: Decimal,
    /// Highest degree.
    pub degree: String,
}

/// Fields required to create an HR record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHr {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Login password.
    pub password: String,
    /// Ten-digit contact number.
    pub contact_number: String,
    /// Salary.
    pub salary: Decimal,
    /// Highest degree.
    pub degree: String,
}

impl NewHr {
    /// Builds the stored record once the store has assigned an id.
    pub fn into_hr(self, id: i64) -> Hr {
        Hr {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            contact_number: self.contact_number,
            salary: self.salary,
            degree: self.degree,
        }
    }
}

/// A partial update to an HR record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HrUpdate {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New contact number.
    pub contact_number: Option<String>,
    /// New salary.
    pub salary: Option<Decimal>,
    /// New degree.
    pub degree: Option<String>,
}

impl HrUpdate {
    /// Returns true if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == HrUpdate::default()
    }

    /// Applies the update to an in-memory record.
    pub fn apply_to(&self, hr: &mut Hr) {
        if let Some(name) = &self.name {
            hr.name = name.clone();
        }
        if let Some(email) = &self.email {
            hr.email = email.clone();
        }
        if let Some(contact_number) = &self.contact_number {
            hr.contact_number = contact_number.clone();
        }
        if let Some(salary) = self.salary {
            hr.salary = salary;
        }
        if let Some(degree) = &self.degree {
            hr.degree = degree.clone();
        }
    }
}
