//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::collections::HashMap;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{RegistrationError, Result};

/// Prefix of environment variables overriding file settings,
/// e.g. `AIDAY_REGISTRATION__ENDPOINT`
pub const ENV_PREFIX: &str = "AIDAY";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub registration: RegistrationConfig,
    pub datasets: DatasetConfig,
    pub seats: SeatsConfig,
    pub no_form: NoFormConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
}

/// Remote registration endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationConfig {
    pub endpoint: String,
    /// No timeout is applied when unset
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

/// Reference dataset locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    pub regions_path: String,
    pub districts_path: String,
    /// Built-in catalog is used when unset
    pub catalog_path: Option<String>,
}

/// Seat capacity configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeatsConfig {
    pub default_capacity: u32,
    pub capacities: HashMap<String, u32>,
}

/// Informational (no-form) direction configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NoFormConfig {
    pub redirect_url: String,
    pub social_links: Vec<SocialLink>,
}

/// Social call-to-action link
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory of the daily rolling log file; stderr only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from defaults, `config.toml` and environment variables
    pub fn new() -> Result<Self> {
        Self::load(None)
    }

    /// Load settings with an explicit configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::load(Some(path))
    }

    fn load(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(RegistrationError::from)
    }
}

impl Default for Settings {
    fn default() -> Self {
        let capacities = [
            ("ai", 60),
            ("rsumo", 30),
            ("contest", 40),
            ("rfutbol", 24),
            ("fixtirolar", 20),
            ("ixtirolar", 20),
        ]
        .into_iter()
        .map(|(direction, seats)| (direction.to_string(), seats))
        .collect();

        Self {
            registration: RegistrationConfig {
                endpoint: "https://aiday.infinite-co.uz/register/".to_string(),
                timeout_seconds: None,
                user_agent: "aiday-register/0.1".to_string(),
            },
            datasets: DatasetConfig {
                regions_path: "data/regions.json".to_string(),
                districts_path: "data/districts.json".to_string(),
                catalog_path: None,
            },
            seats: SeatsConfig {
                default_capacity: 50,
                capacities,
            },
            no_form: NoFormConfig {
                redirect_url: "https://t.me/digitalgeneration_uz".to_string(),
                social_links: vec![
                    SocialLink {
                        label: "Telegram".to_string(),
                        url: "https://t.me/digitalgeneration_uz".to_string(),
                    },
                    SocialLink {
                        label: "Instagram".to_string(),
                        url: "https://www.instagram.com/dguzbekistan".to_string(),
                    },
                ],
            },
            i18n: I18nConfig {
                default_language: "uz".to_string(),
                supported_languages: vec!["uz".to_string(), "ru".to_string()],
                translations_dir: "translations".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::direction::{resolve_direction, SeatCapacities};

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.seats.capacities.get("rfutbol"), Some(&24));
        assert!(settings.registration.timeout_seconds.is_none());
    }

    #[test]
    fn test_every_canonical_direction_has_a_capacity() {
        let seats = SeatCapacities::from_config(&Settings::default().seats);
        for token in ["ai", "robosumo", "contest", "robofutbol", "fixtirolar", "ixtirolar"] {
            let direction = resolve_direction(Some(token));
            assert_ne!(seats.capacity_for(&direction), Settings::default().seats.default_capacity, "{}", token);
        }
        assert_eq!(seats.capacity_for(&resolve_direction(Some("ixtirolar"))), 20);
    }

    #[test]
    fn test_default_settings_render_as_toml() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("[registration]"));
        assert!(rendered.contains("aiday.infinite-co.uz"));
    }
}
