//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the console
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EmsError, EmsResult};

use super::types::{DepartmentCatalog, Settings};

/// Loads and provides access to the console configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── ems.yaml          # Database, attendance, leave and console settings
/// └── departments.yaml  # Department and position catalog
/// ```
///
/// # Example
///
/// ```no_run
/// use ems_console::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// assert!(loader.catalog().has_position("IT", "Data Analyst"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
    catalog: DepartmentCatalog,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or is not valid YAML for
    /// its structure.
    pub fn load<P: AsRef<Path>>(path: P) -> EmsResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("ems.yaml"))?;
        let catalog = Self::load_yaml::<DepartmentCatalog>(&path.join("departments.yaml"))?;

        if catalog.departments.is_empty() {
            return Err(EmsError::ConfigParseError {
                path: path.join("departments.yaml").display().to_string(),
                message: "at least one department is required".to_string(),
            });
        }

        debug!(
            departments = catalog.departments.len(),
            database = %settings.database.path.display(),
            "Loaded configuration"
        );

        Ok(Self { settings, catalog })
    }

    /// Built-in configuration equal to the shipped `config/` directory.
    pub fn default_config() -> Self {
        Self {
            settings: Settings::default(),
            catalog: DepartmentCatalog::default(),
        }
    }

    /// Creates a loader from already-built parts.
    pub fn from_parts(settings: Settings, catalog: DepartmentCatalog) -> Self {
        Self { settings, catalog }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EmsResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EmsError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EmsError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the console settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns mutable settings, used to apply command-line overrides.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Returns the department catalog.
    pub fn catalog(&self) -> &DepartmentCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config"
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_shipped_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().database.path, PathBuf::from("ems_data.db"));
        assert_eq!(
            loader.settings().attendance.full_day_hours,
            Decimal::new(8, 0)
        );
        assert!(!loader.settings().leave.allow_start_today);
        assert_eq!(loader.catalog(), ConfigLoader::default_config().catalog());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EmsError::ConfigNotFound { path }) => {
                assert!(path.contains("ems.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_settings_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ems.yaml", "attendance: [not, a, map]\n");
        write(dir.path(), "departments.yaml", "departments: []\n");

        match ConfigLoader::load(dir.path()) {
            Err(EmsError::ConfigParseError { path, .. }) => {
                assert!(path.contains("ems.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_empty_catalog_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ems.yaml", "{}\n");
        write(dir.path(), "departments.yaml", "departments: []\n");

        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(EmsError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_load_custom_threshold_and_catalog() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "ems.yaml",
            "attendance:\n  full_day_hours: \"7.5\"\nconsole:\n  color: false\n",
        );
        write(
            dir.path(),
            "departments.yaml",
            "departments:\n  - name: Legal\n    positions: [Counsel, Paralegal]\n",
        );

        let loader = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(
            loader.settings().attendance.full_day_hours,
            Decimal::new(75, 1)
        );
        assert!(!loader.settings().console.color);
        assert!(loader.catalog().has_position("Legal", "Paralegal"));
    }
}
