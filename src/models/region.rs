//! Region and district reference models

use serde::{Deserialize, Serialize};

/// Multilingual display name as shipped in the reference datasets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    /// Uzbek, Latin script
    pub name_uz: String,
    /// Uzbek, Cyrillic script
    #[serde(default)]
    pub name_oz: Option<String>,
    #[serde(default)]
    pub name_ru: Option<String>,
}

impl LocalizedName {
    /// Name for a language code, falling back to Uzbek (Latin)
    pub fn get(&self, lang: &str) -> &str {
        let localized = match lang {
            "oz" => self.name_oz.as_deref(),
            "ru" => self.name_ru.as_deref(),
            _ => None,
        };
        localized.filter(|name| !name.is_empty()).unwrap_or(self.name_uz.as_str())
    }

    /// Whether any of the stored spellings equals `name`
    pub fn matches(&self, name: &str) -> bool {
        self.name_uz == name
            || self.name_oz.as_deref() == Some(name)
            || self.name_ru.as_deref() == Some(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    pub soato_id: u64,
    #[serde(flatten)]
    pub name: LocalizedName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: u32,
    pub region_id: u32,
    pub soato_id: u64,
    #[serde(flatten)]
    pub name: LocalizedName,
}
