//! Test helpers module
//!
//! Mock registration endpoint, counting transport and fixture builders
//! shared by the integration tests.

#![allow(dead_code)]

pub mod registration_mock;
pub mod test_data;

pub use registration_mock::*;
pub use test_data::*;
