//! Translation loader and i18n management
//!
//! Translations are JSON objects with dotted-key lookup, `{name}` parameter
//! substitution and plural sub-objects. The Uzbek and Russian files are
//! compiled into the binary so the form works without files on disk; files
//! in the configured directory override them.

use std::collections::HashMap;
use std::path::Path;
use serde_json::{Value, Map};
use tokio::fs;
use tracing::{info, warn, debug};
use crate::utils::errors::{RegistrationError, Result};
use crate::config::I18nConfig;

const EMBEDDED_TRANSLATIONS: &[(&str, &str)] = &[
    ("uz", include_str!("../../translations/uz.json")),
    ("ru", include_str!("../../translations/ru.json")),
];

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by language code
    translations: HashMap<String, Map<String, Value>>,
    default_language: String,
    supported_languages: Vec<String>,
    translations_dir: String,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    /// Create an instance with no translations loaded
    pub fn new(config: &I18nConfig) -> Self {
        Self {
            translations: HashMap::new(),
            default_language: config.default_language.clone(),
            supported_languages: config.supported_languages.clone(),
            translations_dir: config.translations_dir.clone(),
        }
    }

    /// Create an instance holding the compiled-in translations
    pub fn embedded(config: &I18nConfig) -> Result<Self> {
        let mut i18n = Self::new(config);
        for (lang_code, content) in EMBEDDED_TRANSLATIONS {
            if i18n.is_language_supported(lang_code) {
                i18n.insert_language(lang_code, content)?;
            }
        }

        if !i18n.translations.contains_key(&i18n.default_language) {
            return Err(RegistrationError::Config(format!(
                "No embedded translations for default language {}",
                i18n.default_language
            )));
        }
        Ok(i18n)
    }

    /// Load the embedded translations, then override them with files from
    /// the translations directory
    pub async fn load(config: &I18nConfig) -> Result<Self> {
        let mut i18n = Self::embedded(config)?;
        i18n.load_translations().await?;
        Ok(i18n)
    }

    /// Load translation files for every supported language
    pub async fn load_translations(&mut self) -> Result<()> {
        let translations_dir = Path::new(&self.translations_dir).to_path_buf();

        if !translations_dir.exists() {
            warn!(dir = %translations_dir.display(), "Translations directory not found, using embedded translations");
            return Ok(());
        }

        let supported_languages = self.supported_languages.clone();
        for lang_code in &supported_languages {
            let file_path = translations_dir.join(format!("{}.json", lang_code));

            if file_path.exists() {
                self.load_language_file(&file_path, lang_code).await?;
                info!("Loaded translations for language: {}", lang_code);
            } else if !self.translations.contains_key(lang_code) {
                if lang_code == &self.default_language {
                    return Err(RegistrationError::Config(
                        format!("Default language translation file not found: {}", file_path.display())
                    ));
                }
                warn!("Translation file not found: {}", file_path.display());
            }
        }

        Ok(())
    }

    async fn load_language_file(&mut self, file_path: &Path, lang_code: &str) -> Result<()> {
        let content = fs::read_to_string(file_path).await?;
        self.insert_language(lang_code, &content)
    }

    fn insert_language(&mut self, lang_code: &str, content: &str) -> Result<()> {
        match serde_json::from_str(content)? {
            Value::Object(map) => {
                debug!("Loaded {} translation keys for {}", count_keys(&map), lang_code);
                self.translations.insert(lang_code.to_string(), map);
                Ok(())
            }
            _ => Err(RegistrationError::Config(
                format!("Invalid translation file format for {}", lang_code)
            )),
        }
    }

    /// Get a translated message, falling back to the default language and
    /// finally to the key itself
    pub fn t(&self, key: &str, lang: &str, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.effective_language(lang);

        let value = self
            .translation_value(key, effective_lang)
            .or_else(|| self.translation_value(key, &self.default_language));

        match value {
            Some(translation) => format_message(&extract_text(translation), params),
            None => {
                warn!("Translation key '{}' not found in any language", key);
                key.to_string()
            }
        }
    }

    /// Translated message with a single `{name}` parameter
    pub fn t_with(&self, key: &str, lang: &str, name: &str, value: impl ToString) -> String {
        let mut params = TranslationParams::new();
        params.insert(name.to_string(), value.to_string());
        self.t(key, lang, Some(&params))
    }

    /// Get a translated message with pluralization support
    pub fn tp(&self, key: &str, lang: &str, count: i64, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.effective_language(lang);
        let plural_key = format!("{}.{}", key, plural_form(count, effective_lang));

        let mut final_params = params.cloned().unwrap_or_default();
        final_params.insert("count".to_string(), count.to_string());

        match self.translation_value(&plural_key, effective_lang) {
            Some(_) => self.t(&plural_key, effective_lang, Some(&final_params)),
            None => self.t(key, effective_lang, Some(&final_params)),
        }
    }

    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.supported_languages.iter().any(|supported| supported == lang)
    }

    fn effective_language<'a>(&'a self, lang: &'a str) -> &'a str {
        if self.is_language_supported(lang) && self.translations.contains_key(lang) {
            lang
        } else {
            &self.default_language
        }
    }

    /// Walk a dotted key such as `validation.partner.email_invalid`
    fn translation_value(&self, key: &str, lang: &str) -> Option<&Value> {
        let translations = self.translations.get(lang)?;
        let mut parts = key.split('.');
        let mut current = translations.get(parts.next()?)?;

        for part in parts {
            current = current.get(part)?;
        }

        Some(current)
    }

    pub fn supported_languages(&self) -> &[String] {
        &self.supported_languages
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Pick a supported language from a locale such as `ru_RU.UTF-8`
    pub fn detect_language(&self, locale: Option<&str>) -> String {
        if let Some(locale) = locale {
            let lang_code = locale
                .split(|c| c == '-' || c == '_' || c == '.')
                .next()
                .unwrap_or(locale)
                .to_lowercase();

            if self.is_language_supported(&lang_code) {
                return lang_code;
            }
        }

        self.default_language.clone()
    }
}

/// Plural objects resolve to "other" or their first form when used as text
fn extract_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(obj) => match obj.get("other").or_else(|| obj.values().next()) {
            Some(inner) => extract_text(inner),
            None => String::new(),
        },
        _ => value.to_string(),
    }
}

fn format_message(template: &str, params: Option<&TranslationParams>) -> String {
    match params {
        Some(params) => params.iter().fold(template.to_string(), |result, (key, value)| {
            result.replace(&format!("{{{}}}", key), value)
        }),
        None => template.to_string(),
    }
}

/// Plural category for a count
fn plural_form(count: i64, lang: &str) -> &'static str {
    match lang {
        // Uzbek nouns do not inflect after numerals
        "uz" | "oz" => "other",
        "ru" => {
            let abs_count = count.abs();
            let last_digit = abs_count % 10;
            let last_two_digits = abs_count % 100;

            if last_digit == 1 && last_two_digits != 11 {
                "one"
            } else if (2..=4).contains(&last_digit) && !(12..=14).contains(&last_two_digits) {
                "few"
            } else {
                "many"
            }
        }
        _ => {
            if count == 1 { "one" } else { "other" }
        }
    }
}

fn count_keys(obj: &Map<String, Value>) -> usize {
    obj.values()
        .map(|value| match value {
            Value::Object(nested) => count_keys(nested),
            _ => 1,
        })
        .sum()
}
