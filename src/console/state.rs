//! Shared state for the role sessions.
//!
//! Every session borrows the same store, configuration and clock.

use crate::clock::Clock;
use crate::config::{ConfigLoader, DepartmentCatalog, Settings};

/// Resources every role session needs.
pub struct AppState<'a, S, C> {
    store: &'a S,
    config: &'a ConfigLoader,
    clock: C,
}

impl<'a, S, C: Clock> AppState<'a, S, C> {
    /// Bundles the store, loaded configuration and time source.
    pub fn new(store: &'a S, config: &'a ConfigLoader, clock: C) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// The persistent store.
    pub fn store(&self) -> &'a S {
        self.store
    }

    /// The loaded settings.
    pub fn settings(&self) -> &'a Settings {
        self.config.settings()
    }

    /// The department catalog.
    pub fn catalog(&self) -> &'a DepartmentCatalog {
        self.config.catalog()
    }

    /// The time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    #[test]
    fn test_state_exposes_config_and_clock() {
        let store = MemoryStore::new();
        let config = ConfigLoader::default_config();
        let now = NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let state = AppState::new(&store, &config, FixedClock(now));

        assert_eq!(state.clock().today(), now.date());
        assert!(state.catalog().has_position("IT", "System Admin"));
        assert!(!state.settings().leave.allow_start_today);
    }
}
