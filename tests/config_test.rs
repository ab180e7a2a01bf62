//! Configuration loading from files and environment variables

mod helpers;

use std::io::Write;
use assert_matches::assert_matches;
use serial_test::serial;
use tempfile::TempDir;

use aiday_register::config::Settings;
use aiday_register::services::{ReferenceData, StaticCatalog};
use aiday_register::RegistrationError;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
#[serial]
fn test_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "config.toml",
        r#"
[registration]
endpoint = "https://staging.example.uz/register/"
timeout_seconds = 15

[seats]
default_capacity = 10

[seats.capacities]
ai = 5
"#,
    );

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.registration.endpoint, "https://staging.example.uz/register/");
    assert_eq!(settings.registration.timeout_seconds, Some(15));
    assert_eq!(settings.seats.default_capacity, 10);
    assert_eq!(settings.seats.capacities.get("ai"), Some(&5));
    assert_eq!(settings.i18n.default_language, "uz");
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "config.toml", "[logging]\nlevel = \"debug\"\n");

    std::env::set_var("AIDAY_LOGGING__LEVEL", "warn");
    std::env::set_var("AIDAY_REGISTRATION__TIMEOUT_SECONDS", "3");
    let settings = Settings::from_file(&path);
    std::env::remove_var("AIDAY_LOGGING__LEVEL");
    std::env::remove_var("AIDAY_REGISTRATION__TIMEOUT_SECONDS");

    let settings = settings.unwrap();
    assert_eq!(settings.logging.level, "warn");
    assert_eq!(settings.registration.timeout_seconds, Some(3));
}

#[test]
#[serial]
fn test_invalid_endpoint_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "config.toml", "[registration]\nendpoint = \"not a url\"\n");

    let settings = Settings::from_file(&path).unwrap();
    assert_matches!(settings.validate(), Err(RegistrationError::UrlParse(_)));
}

#[test]
#[serial]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = Settings::from_file(&dir.path().join("absent.toml"));
    assert_matches!(result, Err(RegistrationError::ConfigSource(_)));
}

#[tokio::test]
async fn test_datasets_load_from_disk() {
    let dir = TempDir::new().unwrap();
    let regions = write_file(
        &dir,
        "regions.json",
        r#"[{"id": 1, "soato_id": 1735, "name_uz": "Qoraqalpog‘iston Respublikasi", "name_ru": "Республика Каракалпакстан"}]"#,
    );
    let districts = write_file(
        &dir,
        "districts.json",
        r#"[{"id": 1, "region_id": 1, "soato_id": 1735204, "name_uz": "Amudaryo tumani"}]"#,
    );

    let data = ReferenceData::load(&regions, &districts).await.unwrap();
    assert_eq!(data.districts_in(1).len(), 1);
    assert_eq!(data.region(1).map(|region| region.name.get("ru")), Some("Республика Каракалпакстан"));
}

#[tokio::test]
async fn test_missing_dataset_is_reported() {
    let dir = TempDir::new().unwrap();
    let result = ReferenceData::load(&dir.path().join("regions.json"), &dir.path().join("districts.json")).await;
    assert_matches!(result, Err(RegistrationError::Dataset(_)));
}

#[tokio::test]
async fn test_catalog_file_replaces_builtin() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "catalog.json",
        r#"[{"id": "hack", "title": "Hackathon", "link": "/register/hack", "gifts": ["Noutbuk"]}]"#,
    );

    let catalog = StaticCatalog::load(Some(&path)).await.unwrap();
    let entries = aiday_register::CatalogProvider::list_entries(&catalog);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].prizes, vec!["Noutbuk".to_string()]);
}

#[test]
#[serial]
fn test_effective_config_renders_as_toml() {
    let mut settings = Settings::default();
    settings.registration.endpoint = "https://aiday.example.uz/register/".to_string();

    let rendered = settings.to_toml().unwrap();
    let reparsed: Settings = toml::from_str(&rendered).unwrap();
    assert_eq!(reparsed.registration.endpoint, settings.registration.endpoint);
    assert_eq!(reparsed.seats.capacities, settings.seats.capacities);
}
