//! Customer registry entries.

use serde::{Deserialize, Serialize};

/// A known customer in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Registry identifier.
    pub id: String,

    /// Display name. Entries without a name never match.
    #[serde(default)]
    pub name: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// Entry with no display name.
    pub fn unnamed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// Load a registry from a JSON array of `{ "id": ..., "name": ... }`.
pub fn registry_from_json(json: &str) -> serde_json::Result<Vec<Customer>> {
    serde_json::from_str(json)
}
