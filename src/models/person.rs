//! Participant model

use std::fmt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which participant section of the form a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Partner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Primary => write!(f, "primary"),
            Role::Partner => write!(f, "partner"),
        }
    }
}

/// Editable participant record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub study_place: String,
    /// Localised region name, written by the region selector
    pub region: String,
    /// Localised district name, written by the district selector
    pub district: String,
}

/// Update of one free-text or date field.
///
/// Region and district are not listed: they only change through the
/// region/district selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    PhoneNumber(String),
    BirthDate(Option<NaiveDate>),
    Email(String),
    StudyPlace(String),
}

impl Person {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FirstName(value) => self.first_name = value,
            FieldUpdate::LastName(value) => self.last_name = value,
            FieldUpdate::PhoneNumber(value) => self.phone_number = value,
            FieldUpdate::BirthDate(value) => self.birth_date = value,
            FieldUpdate::Email(value) => self.email = value,
            FieldUpdate::StudyPlace(value) => self.study_place = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_updates_only_named_field() {
        let mut person = Person::default();
        person.apply(FieldUpdate::FirstName("Aziz".to_string()));
        person.apply(FieldUpdate::BirthDate(NaiveDate::from_ymd_opt(2007, 5, 1)));

        assert_eq!(person.first_name, "Aziz");
        assert_eq!(person.birth_date, NaiveDate::from_ymd_opt(2007, 5, 1));
        assert!(person.email.is_empty());
        assert!(person.region.is_empty());
    }
}
