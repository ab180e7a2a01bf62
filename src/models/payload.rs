//! Registration payload sent to the remote endpoint
//!
//! Built once at submit time from the form state. Every text field is
//! trimmed and fields left empty are omitted from the serialized object.

use serde::Serialize;
use crate::models::direction::DirectionKey;
use crate::models::person::Person;
use crate::utils::helpers::{format_birth_date, trim_non_empty};

/// Participant fields of the payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

impl PersonPayload {
    pub fn from_person(person: &Person) -> Self {
        Self {
            first_name: trim_non_empty(&person.first_name),
            last_name: trim_non_empty(&person.last_name),
            phone_number: trim_non_empty(&person.phone_number),
            birth_date: person.birth_date.map(format_birth_date),
            email: trim_non_empty(&person.email),
            study_place: trim_non_empty(&person.study_place),
            region: trim_non_empty(&person.region),
            district: trim_non_empty(&person.district),
        }
    }
}

/// Wire payload of one registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationPayload {
    #[serde(flatten)]
    pub participant: PersonPayload,
    pub direction: DirectionKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<PersonPayload>,
}

impl RegistrationPayload {
    /// Build the payload.
    ///
    /// `direction_input` is the free-text direction field; it goes through the
    /// same alias normalisation as route tokens and falls back to `resolved`
    /// when blank.
    pub fn build(
        primary: &Person,
        partner: Option<&Person>,
        direction_input: &str,
        resolved: &DirectionKey,
    ) -> Self {
        Self {
            participant: PersonPayload::from_person(primary),
            direction: DirectionKey::canonicalize(direction_input, resolved),
            partner: partner.map(PersonPayload::from_person),
        }
    }

    pub fn is_team(&self) -> bool {
        self.partner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use crate::models::direction::resolve_direction;

    fn person() -> Person {
        Person {
            first_name: "  Dilnoza ".to_string(),
            last_name: "".to_string(),
            phone_number: "+998901234567 ".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2006, 9, 2),
            email: " dilnoza@example.uz".to_string(),
            study_place: "   ".to_string(),
            region: "Toshkent shahri".to_string(),
            district: String::new(),
        }
    }

    #[test]
    fn test_trims_and_omits_empty_fields() {
        let direction = resolve_direction(Some("ai"));
        let payload = RegistrationPayload::build(&person(), None, "ai", &direction);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "first_name": "Dilnoza",
                "phone_number": "+998901234567",
                "birth_date": "2006-09-02",
                "email": "dilnoza@example.uz",
                "region": "Toshkent shahri",
                "direction": "ai"
            })
        );
        assert!(value.get("study_place").is_none());
        assert!(value.get("partner").is_none());
    }

    #[test]
    fn test_direction_field_is_canonicalized() {
        let direction = resolve_direction(Some("ai"));
        let payload = RegistrationPayload::build(&person(), None, " Robo-Sumo", &direction);
        assert_eq!(payload.direction.as_str(), "rsumo");

        let blank = RegistrationPayload::build(&person(), None, "", &direction);
        assert_eq!(blank.direction.as_str(), "ai");
    }

    #[test]
    fn test_partner_is_nested() {
        let direction = resolve_direction(Some("rfutbol"));
        let partner = Person {
            first_name: "Jasur".to_string(),
            email: "jasur@example.uz".to_string(),
            ..Person::default()
        };
        let payload = RegistrationPayload::build(&person(), Some(&partner), "rfutbol", &direction);
        let value = serde_json::to_value(&payload).unwrap();

        assert!(payload.is_team());
        assert_eq!(value["partner"], json!({"first_name": "Jasur", "email": "jasur@example.uz"}));
        assert_eq!(value["direction"], "rfutbol");
    }
}
