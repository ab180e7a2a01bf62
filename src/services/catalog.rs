//! Event catalog service
//!
//! The catalog is an injected, read-only collaborator. The controller only
//! ever asks it for the ordered entry list and picks the best match for the
//! resolved direction.

use std::path::Path;
use tracing::{debug, info};
use crate::models::catalog::CatalogEntry;
use crate::models::direction::DirectionKey;
use crate::utils::errors::{RegistrationError, Result};

/// Built-in catalog shipped with the binary
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Read-only source of catalog entries
pub trait CatalogProvider: Send + Sync {
    /// Entries in display order
    fn list_entries(&self) -> &[CatalogEntry];
}

/// Catalog held in memory for the whole session
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of entries
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Load a catalog file, or the built-in catalog when no path is given
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(path) => {
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    RegistrationError::Dataset(format!("Failed to read catalog {}: {}", path.display(), e))
                })?;
                Self::from_json_str(&content)?
            }
            None => Self::builtin()?,
        };

        info!(entries = catalog.entries.len(), "Event catalog loaded");
        Ok(catalog)
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

/// Pick the catalog entry for a direction.
///
/// Rules are tried in order over the whole catalog: identifier equals the
/// key, link equals `/register/<key>`, link ends with the key. Without a
/// match the first entry is used, and an empty catalog yields the
/// placeholder entry.
pub fn lookup_entry(provider: &dyn CatalogProvider, direction: &DirectionKey) -> CatalogEntry {
    let entries = provider.list_entries();
    let key = direction.as_str();
    let register_link = direction.register_link();

    let matched = entries
        .iter()
        .find(|entry| entry.id == key)
        .or_else(|| entries.iter().find(|entry| entry.link.as_deref() == Some(register_link.as_str())))
        .or_else(|| entries.iter().find(|entry| entry.link.as_deref().is_some_and(|link| link.ends_with(key))));

    match matched {
        Some(entry) => {
            debug!(direction = key, entry_id = %entry.id, "Catalog entry matched");
            entry.clone()
        }
        None => {
            debug!(direction = key, "No catalog entry matched, using fallback");
            entries.first().cloned().unwrap_or_else(CatalogEntry::placeholder)
        }
    }
}
