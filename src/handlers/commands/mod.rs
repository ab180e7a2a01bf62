//! Command handlers module
//!
//! Line commands typed into the terminal host and their mapping onto form
//! events.

pub mod help;

use std::str::FromStr;
use crate::models::person::{FieldUpdate, Role};
use crate::state::controller::FormEvent;
use crate::utils::errors::{RegistrationError, Result};
use crate::utils::helpers::{normalize_whitespace, parse_birth_date};

/// Editable text and date fields, by their command-line names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    FirstName,
    LastName,
    PhoneNumber,
    BirthDate,
    Email,
    StudyPlace,
}

impl FromStr for FieldName {
    type Err = RegistrationError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "first_name" | "name" => Ok(FieldName::FirstName),
            "last_name" | "surname" => Ok(FieldName::LastName),
            "phone" | "phone_number" => Ok(FieldName::PhoneNumber),
            "birth_date" | "birthday" => Ok(FieldName::BirthDate),
            "email" => Ok(FieldName::Email),
            "study_place" | "school" => Ok(FieldName::StudyPlace),
            other => Err(RegistrationError::InvalidInput(format!("Unknown field: {}", other))),
        }
    }
}

impl FieldName {
    /// Build the update for a raw value. An empty birth date clears it.
    pub fn update(self, value: &str) -> Result<FieldUpdate> {
        let value = value.to_string();
        Ok(match self {
            FieldName::FirstName => FieldUpdate::FirstName(value),
            FieldName::LastName => FieldUpdate::LastName(value),
            FieldName::PhoneNumber => FieldUpdate::PhoneNumber(value),
            FieldName::Email => FieldUpdate::Email(value),
            FieldName::StudyPlace => FieldUpdate::StudyPlace(value),
            FieldName::BirthDate if value.trim().is_empty() => FieldUpdate::BirthDate(None),
            FieldName::BirthDate => {
                let date = parse_birth_date(&value).ok_or_else(|| {
                    RegistrationError::InvalidInput(format!("Birth date must be YYYY-MM-DD: {}", value))
                })?;
                FieldUpdate::BirthDate(Some(date))
            }
        })
    }
}

/// Commands accepted by the terminal host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Open(String),
    Set { role: Role, update: FieldUpdate },
    Region { role: Role, region_id: Option<u32> },
    District { role: Role, district_id: u32 },
    Regions,
    Districts(Role),
    Direction(String),
    Agree(bool),
    Submit,
    Back,
    Home,
    Help,
    Quit,
}

impl HostCommand {
    /// Form event for commands that act on the mounted form
    pub fn into_event(self) -> Option<FormEvent> {
        match self {
            HostCommand::Set { role, update } => Some(FormEvent::Edit { role, update }),
            HostCommand::Region { role, region_id } => Some(FormEvent::SelectRegion { role, region_id }),
            HostCommand::District { role, district_id } => Some(FormEvent::SelectDistrict { role, district_id }),
            HostCommand::Direction(text) => Some(FormEvent::SetDirection(text)),
            HostCommand::Agree(agreed) => Some(FormEvent::SetAgreement(agreed)),
            HostCommand::Back => Some(FormEvent::Cancel),
            HostCommand::Home => Some(FormEvent::GoHome),
            _ => None,
        }
    }
}

/// Split an optional leading `partner` word off the arguments
fn take_role(args: &str) -> (Role, &str) {
    let args = args.trim_start();
    match args.split_once(char::is_whitespace) {
        Some((first, rest)) if first.eq_ignore_ascii_case("partner") => (Role::Partner, rest.trim_start()),
        None if args.eq_ignore_ascii_case("partner") => (Role::Partner, ""),
        _ => (Role::Primary, args),
    }
}

fn parse_id(text: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| RegistrationError::InvalidInput(format!("Expected a numeric id: {}", text.trim())))
}

impl FromStr for HostCommand {
    type Err = RegistrationError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match name.to_lowercase().as_str() {
            "open" => Ok(HostCommand::Open(args.trim().to_string())),
            "set" => {
                let (role, rest) = take_role(args);
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(RegistrationError::InvalidInput("Usage: set [partner] <field> <value>".to_string()));
                }
                let update = field.parse::<FieldName>()?.update(value)?;
                Ok(HostCommand::Set { role, update })
            }
            "region" => {
                let (role, rest) = take_role(args);
                let region_id = match rest.trim() {
                    "" | "none" => None,
                    id => Some(parse_id(id)?),
                };
                Ok(HostCommand::Region { role, region_id })
            }
            "district" => {
                let (role, rest) = take_role(args);
                Ok(HostCommand::District { role, district_id: parse_id(rest)? })
            }
            "regions" => Ok(HostCommand::Regions),
            "districts" => Ok(HostCommand::Districts(take_role(args).0)),
            "direction" => Ok(HostCommand::Direction(normalize_whitespace(args))),
            "agree" => match args.trim().to_lowercase().as_str() {
                "" | "yes" | "ha" | "да" => Ok(HostCommand::Agree(true)),
                "no" | "yo'q" | "нет" => Ok(HostCommand::Agree(false)),
                other => Err(RegistrationError::InvalidInput(format!("Expected yes or no: {}", other))),
            },
            "submit" => Ok(HostCommand::Submit),
            "back" | "esc" | "cancel" => Ok(HostCommand::Back),
            "home" => Ok(HostCommand::Home),
            "help" | "?" => Ok(HostCommand::Help),
            "quit" | "exit" => Ok(HostCommand::Quit),
            _ => Err(RegistrationError::InvalidInput(line.to_string())),
        }
    }
}
