//! Test data helpers
//!
//! Builders for settings, participants and controller contexts.

use std::sync::Arc;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use aiday_register::config::Settings;
use aiday_register::models::{FieldUpdate, Person, Role};
use aiday_register::services::{RegistrationTransport, ReferenceData, StaticCatalog};
use aiday_register::state::{FormContext, FormEvent, RegistrationController};
use aiday_register::I18n;

/// Region and district ids present in the built-in datasets
pub const TASHKENT_CITY: u32 = 14;
pub const CHILONZOR: u32 = 46;
pub const ANDIJON: u32 = 2;

/// Default settings pointed at a test endpoint
pub fn test_settings(endpoint: &str) -> Settings {
    let mut settings = Settings::default();
    settings.registration.endpoint = endpoint.to_string();
    settings.registration.timeout_seconds = Some(5);
    settings
}

/// Context with built-in datasets, embedded translations and the given transport
pub fn test_context(settings: &Settings, transport: Arc<dyn RegistrationTransport>) -> Arc<FormContext> {
    Arc::new(FormContext::new(
        settings,
        Arc::new(StaticCatalog::builtin().expect("built-in catalog")),
        Arc::new(ReferenceData::builtin().expect("built-in datasets")),
        transport,
        Arc::new(I18n::embedded(&settings.i18n).expect("embedded translations")),
    ))
}

/// Controller mounted for a route token in Uzbek
pub fn mount_form(context: &Arc<FormContext>, token: &str) -> RegistrationController {
    RegistrationController::mount(Arc::clone(context), Some(token), "uz")
}

/// Participant passing every validation rule
pub fn valid_person() -> Person {
    Person {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        phone_number: format!("+99890{}", (1_000_000..9_999_999).fake::<u32>()),
        email: SafeEmail().fake(),
        ..Person::default()
    }
}

/// Type a participant into the form field by field
pub fn fill_person(controller: &mut RegistrationController, role: Role, person: &Person) {
    let updates = [
        FieldUpdate::FirstName(person.first_name.clone()),
        FieldUpdate::LastName(person.last_name.clone()),
        FieldUpdate::PhoneNumber(person.phone_number.clone()),
        FieldUpdate::BirthDate(person.birth_date),
        FieldUpdate::Email(person.email.clone()),
        FieldUpdate::StudyPlace(person.study_place.clone()),
    ];
    for update in updates {
        controller
            .apply(FormEvent::Edit { role, update })
            .expect("field edit accepted");
    }
}
