//! Terminal host handlers
//!
//! This module contains the line-oriented presentation host:
//! - Route parsing for `/` and `/register/:id`
//! - Command parsing for form interactions
//! - Rendering of views and UI commands
//! - The session tying them to a mounted controller

pub mod commands;
pub mod render;
pub mod routes;
pub mod session;

pub use commands::{FieldName, HostCommand};
pub use routes::Route;
pub use session::{Flow, Reply, Session};
