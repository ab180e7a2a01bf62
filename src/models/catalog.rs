//! Event catalog model

use serde::{Deserialize, Deserializer, Serialize};

/// Title shown when the catalog has nothing for a direction
pub const PLACEHOLDER_TITLE: &str = "Ro‘yxat";

/// Display metadata of one direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog identifier; numeric ids are kept in their textual form
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: Option<String>,
    #[serde(default, alias = "image")]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, alias = "gifts")]
    pub prizes: Vec<String>,
}

impl CatalogEntry {
    /// Entry shown when the catalog is empty
    pub fn placeholder() -> Self {
        Self {
            id: String::new(),
            title: PLACEHOLDER_TITLE.to_string(),
            description: None,
            image_ref: None,
            link: None,
            prizes: Vec::new(),
        }
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
