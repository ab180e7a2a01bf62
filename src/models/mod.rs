//! Data models module
//!
//! This module contains all data structures used throughout the crate

pub mod catalog;
pub mod direction;
pub mod payload;
pub mod person;
pub mod region;

// Re-export commonly used models
pub use catalog::CatalogEntry;
pub use direction::{DirectionKey, FormMode, SeatCapacities, resolve_direction};
pub use payload::{PersonPayload, RegistrationPayload};
pub use person::{FieldUpdate, Person, Role};
pub use region::{District, LocalizedName, Region};
