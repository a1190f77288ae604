//! Configuration types for the employee management console.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has a
//! default so a partial `ems.yaml` is valid.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// Location of the SQLite database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path to the database file, created if missing.
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ems_data.db"),
        }
    }
}

/// Attendance classification rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttendancePolicy {
    /// Hours at or above which a day counts as a full day.
    pub full_day_hours: Decimal,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            full_day_hours: Decimal::new(8, 0),
        }
    }
}

/// Leave date rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeavePolicy {
    /// When true a leave may start today; otherwise it must start after today.
    pub allow_start_today: bool,
}

/// Password rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialPolicy {
    /// Minimum password length for new accounts.
    pub min_password_length: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_password_length: 4,
        }
    }
}

/// Terminal output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Emit ANSI colors.
    pub color: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self { color: true }
    }
}

/// The manager account seeded into an empty database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ManagerSeed {
    /// Display name.
    pub name: String,
    /// Initial password.
    pub password: String,
}

impl Default for ManagerSeed {
    fn default() -> Self {
        Self {
            name: "Manager".to_string(),
            password: "admin".to_string(),
        }
    }
}

/// Settings file structure (`ems.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Database location.
    pub database: DatabaseSettings,
    /// Attendance rules.
    pub attendance: AttendancePolicy,
    /// Leave rules.
    pub leave: LeavePolicy,
    /// Password rules.
    pub credentials: CredentialPolicy,
    /// Terminal settings.
    pub console: ConsoleSettings,
    /// Manager seed account.
    pub bootstrap_manager: ManagerSeed,
}

/// A department and the positions it offers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Department {
    /// Department name, e.g. "IT".
    pub name: String,
    /// Positions available in the department.
    pub positions: Vec<String>,
}

/// Department catalog file structure (`departments.yaml`).
///
/// Order is preserved so menus list departments as configured.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DepartmentCatalog {
    /// The departments.
    pub departments: Vec<Department>,
}

impl DepartmentCatalog {
    /// Finds a department by exact name.
    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name == name)
    }

    /// Returns true if the department exists and offers the position.
    pub fn has_position(&self, department: &str, position: &str) -> bool {
        self.department(department)
            .is_some_and(|d| d.positions.iter().any(|p| p == position))
    }

    /// Department names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.departments.iter().map(|d| d.name.as_str()).collect()
    }
}

impl Default for DepartmentCatalog {
    fn default() -> Self {
        let department = |name: &str, positions: &[&str]| Department {
            name: name.to_string(),
            positions: positions.iter().map(|p| p.to_string()).collect(),
        };
        Self {
            departments: vec![
                department(
                    "IT",
                    &[
                        "Software Engineer",
                        "Data Analyst",
                        "System Admin",
                        "Backend Developer",
                        "QA Engineer",
                    ],
                ),
                department(
                    "Finance",
                    &["Accountant", "Financial Analyst", "Auditor", "Finance Manager"],
                ),
                department(
                    "Marketing",
                    &[
                        "Marketing Executive",
                        "SEO Specialist",
                        "Content Strategist",
                        "Brand Manager",
                    ],
                ),
                department(
                    "Operations",
                    &[
                        "Operations Manager",
                        "Logistics Coordinator",
                        "Inventory Manager",
                        "Supply Chain Analyst",
                    ],
                ),
            ],
        }
    }
}
