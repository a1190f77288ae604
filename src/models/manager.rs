//! Manager model.

use serde::{Deserialize, Serialize};

/// The manager account. There is normally exactly one, seeded on first run;
/// only its password changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    /// Unique identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login password.
    #[serde(skip_serializing, default)]
    pub password: String,
}
