//! Property tests for direction resolution, validation and the cascade

mod helpers;

use proptest::prelude::*;

use aiday_register::models::direction::alias_for;
use aiday_register::models::{resolve_direction, Person, Role};
use aiday_register::services::{lookup_entry, ReferenceData, StaticCatalog};
use aiday_register::state::{is_valid_email, validate_form, validate_person, RegionCascade, Rule};

const ALIASED: &[(&str, &str)] = &[
    ("AI", "ai"),
    ("RoboSumo", "rsumo"),
    ("robo-sumo", "rsumo"),
    ("RFUTBOL", "rfutbol"),
    ("RoboFutbol", "rfutbol"),
    ("Contest", "contest"),
    ("FIXTIROLAR", "fixtirolar"),
    ("ixtirolar", "ixtirolar"),
];

#[test]
fn test_aliased_tokens_resolve_to_table_value() {
    for (token, expected) in ALIASED {
        assert_eq!(resolve_direction(Some(token)).as_str(), *expected, "token {}", token);
    }
    assert_eq!(resolve_direction(None).as_str(), "ai");
    assert_eq!(resolve_direction(Some("")).as_str(), "ai");
}

#[test]
fn test_email_examples() {
    assert!(is_valid_email("a@b.co"));
    for rejected in ["abc", "a@b", "@b.co"] {
        assert!(!is_valid_email(rejected), "{} should be rejected", rejected);
    }
}

#[test]
fn test_region_switch_limits_districts() {
    let reference = ReferenceData::builtin().unwrap();
    let regions: Vec<u32> = reference.regions().iter().map(|region| region.id).collect();

    for first in &regions {
        for second in &regions {
            let mut cascade = RegionCascade::new(Role::Primary, "uz");
            let mut person = Person::default();

            cascade.select_region(&reference, &mut person, Some(*first)).unwrap();
            if let Some(district) = cascade.district_options().first().cloned() {
                cascade.select_district(&mut person, district.id).unwrap();
            }
            cascade.select_region(&reference, &mut person, Some(*second)).unwrap();

            assert!(person.district.is_empty());
            assert_eq!(cascade.district_options().to_vec(), reference.districts_in(*second));
        }
    }
}

fn text_field() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("   ".to_string()), "[a-z]{1,8}", "[a-z]{1,6}@[a-z]{1,6}\\.[a-z]{2,3}"]
}

proptest! {
    #[test]
    fn prop_unknown_tokens_resolve_to_lowercase(token in "[a-zA-Z0-9_-]{1,16}") {
        let lowered = token.to_lowercase();
        prop_assume!(alias_for(&lowered).is_none());
        let resolved = resolve_direction(Some(&token));
        prop_assert_eq!(resolved.as_str(), lowered.as_str());
    }

    #[test]
    fn prop_resolution_is_idempotent(token in "[a-zA-Z0-9-]{0,16}") {
        let once = resolve_direction(Some(&token));
        let twice = resolve_direction(Some(once.as_str()));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_catalog_lookup_is_deterministic(token in "[a-z]{0,10}") {
        let catalog = StaticCatalog::builtin().unwrap();
        let direction = resolve_direction(Some(&token));
        prop_assert_eq!(lookup_entry(&catalog, &direction), lookup_entry(&catalog, &direction));
    }

    #[test]
    fn prop_empty_first_name_reported_first(
        first_name in prop_oneof![Just(String::new()), Just("  ".to_string())],
        phone in text_field(),
        email in text_field(),
        study_place in text_field(),
    ) {
        let person = Person { first_name, phone_number: phone, email, study_place, ..Person::default() };
        let error = validate_person(&person, Role::Primary).unwrap_err();
        prop_assert_eq!(error.rule, Rule::FirstNameRequired);
    }

    #[test]
    fn prop_partner_checked_only_after_primary(
        primary_name in prop_oneof![Just(String::new()), Just("Aziz".to_string())],
        partner_email in text_field(),
    ) {
        let primary = Person {
            first_name: primary_name.clone(),
            phone_number: "+998901234567".to_string(),
            email: "aziz@example.uz".to_string(),
            ..Person::default()
        };
        let partner = Person { email: partner_email, ..Person::default() };

        let error = validate_form(&primary, Some(&partner)).unwrap_err();
        let expected_role = if primary_name.is_empty() { Role::Primary } else { Role::Partner };
        prop_assert_eq!(error.role, expected_role);
    }

    #[test]
    fn prop_generated_addresses_are_valid(local in "[a-z0-9.]{1,10}", domain in "[a-z]{1,10}", tld in "[a-z]{2,4}") {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(is_valid_email(&email));
    }
}
