//! Internationalization module
//!
//! Uzbek and Russian texts for the registration form: validation and guard
//! messages, labels, defaults and the pluralised seats-left line.

pub mod loader;

pub use loader::{I18n, TranslationParams};
