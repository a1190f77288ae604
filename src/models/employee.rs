//! Employee model and related types.
//!
//! This module defines the Employee record together with the insert and
//! partial-update shapes used by HR, the Manager and the employee's own
//! profile screen.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Login password.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Age in years.
    pub age: u32,
    /// Gender as entered by HR.
    pub gender: String,
    /// Postal address.
    pub address: String,
    /// Department from the department catalog.
    pub department: String,
    /// Position within the department.
    pub position: String,
    /// Current salary.
    pub salary: Decimal,
    /// Email address (unique).
    pub email: String,
    /// Ten-digit contact number (unique).
    pub contact_number: String,
    /// The date the employee was added.
    pub joining_date: NaiveDate,
    /// Highest degree.
    pub degree: String,
}

/// Fields required to create an employee.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    /// Full name.
    pub name: String,
    /// Login password.
    pub password: String,
    /// Age in years.
    pub age: u32,
    /// Gender.
    pub gender: String,
    /// Postal address.
    pub address: String,
    /// Department from the catalog.
    pub department: String,
    /// Position within the department.
    pub position: String,
    /// Starting salary.
    pub salary: Decimal,
    /// Email address.
    pub email: String,
    /// Ten-digit contact number.
    pub contact_number: String,
    /// Joining date.
    pub joining_date: NaiveDate,
    /// Highest degree.
    pub degree: String,
}

/// A partial update to an employee. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeUpdate {
    /// New password.
    pub password: Option<String>,
    /// New age.
    pub age: Option<u32>,
    /// New address.
    pub address: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New position.
    pub position: Option<String>,
    /// New salary.
    pub salary: Option<Decimal>,
    /// New email.
    pub email: Option<String>,
    /// New contact number.
    pub contact_number: Option<String>,
    /// New degree.
    pub degree: Option<String>,
}

impl EmployeeUpdate {
    /// Returns true if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == EmployeeUpdate::default()
    }

    /// Applies the update to an in-memory record.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(password) = &self.password {
            employee.password = password.clone();
        }
        if let Some(age) = self.age {
            employee.age = age;
        }
        if let Some(address) = &self.address {
            employee.address = address.clone();
        }
        if let Some(department) = &self.department {
            employee.department = department.clone();
        }
        if let Some(position) = &self.position {
            employee.position = position.clone();
        }
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(email) = &self.email {
            employee.email = email.clone();
        }
        if let Some(contact_number) = &self.contact_number {
            employee.contact_number = contact_number.clone();
        }
        if let Some(degree) = &self.degree {
            employee.degree = degree.clone();
        }
    }
}

impl NewEmployee {
    /// Builds the stored record once the store has assigned an id.
    pub fn into_employee(self, id: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            password: self.password,
            age: self.age,
            gender: self.gender,
            address: self.address,
            department: self.department,
            position: self.position,
            salary: self.salary,
            email: self.email,
            contact_number: self.contact_number,
            joining_date: self.joining_date,
            degree: self.degree,
        }
    }
}
