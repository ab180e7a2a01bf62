//! AI Day registration
//!
//! Registration form controller for the AI Day event directions. It resolves
//! a route token to a direction, picks the catalog entry and form mode,
//! manages participant fields and the region/district cascade, validates the
//! input and posts the registration payload to the remote endpoint.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RegistrationError, Result};

// Re-export main components for easy access
pub use services::{CatalogProvider, HttpRegistrationClient, ReferenceData, RegistrationTransport, StaticCatalog};
pub use state::{FormContext, FormEvent, RegistrationController, UiCommand};
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
