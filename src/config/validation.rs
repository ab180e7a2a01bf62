//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{RegistrationError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_registration_config(&settings.registration)?;
    validate_dataset_config(&settings.datasets)?;
    validate_seats_config(&settings.seats)?;
    validate_no_form_config(&settings.no_form)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate registration endpoint configuration
fn validate_registration_config(config: &super::RegistrationConfig) -> Result<()> {
    if config.endpoint.is_empty() {
        return Err(RegistrationError::Config(
            "Registration endpoint is required".to_string()
        ));
    }

    let endpoint = url::Url::parse(&config.endpoint)?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(RegistrationError::Config(
            format!("Registration endpoint must be http(s): {}", config.endpoint)
        ));
    }

    if config.timeout_seconds == Some(0) {
        return Err(RegistrationError::Config(
            "Registration timeout must be greater than 0 when set".to_string()
        ));
    }

    Ok(())
}

/// Validate dataset paths
fn validate_dataset_config(config: &super::DatasetConfig) -> Result<()> {
    if config.regions_path.is_empty() {
        return Err(RegistrationError::Config(
            "Regions dataset path is required".to_string()
        ));
    }

    if config.districts_path.is_empty() {
        return Err(RegistrationError::Config(
            "Districts dataset path is required".to_string()
        ));
    }

    if config.catalog_path.as_deref() == Some("") {
        return Err(RegistrationError::Config(
            "Catalog path must not be empty when set".to_string()
        ));
    }

    Ok(())
}

/// Validate seat capacities
fn validate_seats_config(config: &super::SeatsConfig) -> Result<()> {
    if config.default_capacity == 0 {
        return Err(RegistrationError::Config(
            "Default seat capacity must be greater than 0".to_string()
        ));
    }

    if let Some(direction) = config.capacities.keys().find(|key| key.trim().is_empty() || key.to_lowercase() != **key) {
        return Err(RegistrationError::Config(
            format!("Seat capacity keys must be lower-case direction keys, got '{}'", direction)
        ));
    }

    Ok(())
}

/// Validate the informational direction configuration
fn validate_no_form_config(config: &super::NoFormConfig) -> Result<()> {
    url::Url::parse(&config.redirect_url)?;

    for link in &config.social_links {
        if link.label.is_empty() {
            return Err(RegistrationError::Config(
                format!("Social link label is required for {}", link.url)
            ));
        }
        url::Url::parse(&link.url)?;
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(RegistrationError::Config(
            "Default language is required".to_string()
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(RegistrationError::Config(
            "At least one supported language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(RegistrationError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RegistrationError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(RegistrationError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
