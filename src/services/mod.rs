//! Services module
//!
//! External collaborators of the registration form: the event catalog, the
//! region/district reference datasets and the registration endpoint.

pub mod catalog;
pub mod reference;
pub mod registration;

// Re-export commonly used services
pub use catalog::{lookup_entry, CatalogProvider, StaticCatalog};
pub use reference::ReferenceData;
pub use registration::{
    HttpRegistrationClient, RegistrationTransport, ResponseBody, TransportResponse,
};
