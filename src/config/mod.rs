//! Configuration loading for the employee management console.
//!
//! This module loads the console settings and the department catalog from
//! YAML files in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use ems_console::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Database: {}", config.settings().database.path.display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendancePolicy, ConsoleSettings, CredentialPolicy, DatabaseSettings, Department,
    DepartmentCatalog, LeavePolicy, ManagerSeed, Settings,
};
