//! Participant validation
//!
//! Rules are checked in a fixed order and only the first violation is
//! reported. In team mode the partner is checked after the primary record
//! passes.

use std::fmt;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use crate::models::person::{Person, Role};

lazy_static! {
    /// `non-space @ non-space . non-space`
    static ref EMAIL_RE: Regex = Regex::new(r"^\S+@\S+\.\S+$").unwrap();
}

/// Validation rules in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    FirstNameRequired,
    PhoneRequired,
    EmailRequired,
    EmailInvalid,
}

impl Rule {
    pub const ORDER: [Rule; 4] = [
        Rule::FirstNameRequired,
        Rule::PhoneRequired,
        Rule::EmailRequired,
        Rule::EmailInvalid,
    ];

    fn key(&self) -> &'static str {
        match self {
            Rule::FirstNameRequired => "first_name_required",
            Rule::PhoneRequired => "phone_required",
            Rule::EmailRequired => "email_required",
            Rule::EmailInvalid => "email_invalid",
        }
    }

    /// Whether `person` breaks this rule on its own
    pub fn is_violated_by(&self, person: &Person) -> bool {
        match self {
            Rule::FirstNameRequired => person.first_name.trim().is_empty(),
            Rule::PhoneRequired => person.phone_number.trim().is_empty(),
            Rule::EmailRequired => person.email.trim().is_empty(),
            Rule::EmailInvalid => !is_valid_email(&person.email),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// First violated rule of one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{role} participant: {rule}")]
pub struct ValidationError {
    pub role: Role,
    pub rule: Rule,
}

impl ValidationError {
    pub fn new(role: Role, rule: Rule) -> Self {
        Self { role, rule }
    }

    /// Translation key of the user-facing message
    pub fn message_key(&self) -> String {
        format!("validation.{}.{}", self.role, self.rule.key())
    }
}

/// Basic e-mail shape check on the value as typed
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check one participant
pub fn validate_person(person: &Person, role: Role) -> Result<(), ValidationError> {
    let violated = Rule::ORDER.into_iter().find(|rule| rule.is_violated_by(person));

    match violated {
        Some(rule) => Err(ValidationError::new(role, rule)),
        None => Ok(()),
    }
}

/// Check the primary participant, then the partner when there is one
pub fn validate_form(primary: &Person, partner: Option<&Person>) -> Result<(), ValidationError> {
    validate_person(primary, Role::Primary)?;
    if let Some(partner) = partner {
        validate_person(partner, Role::Partner)?;
    }
    Ok(())
}
