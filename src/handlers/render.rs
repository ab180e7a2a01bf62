//! Text rendering of landing and form views

use crate::i18n::{I18n, TranslationParams};
use crate::models::direction::FormMode;
use crate::models::person::Role;
use crate::models::region::{District, Region};
use crate::services::catalog::CatalogProvider;
use crate::state::controller::{FormView, ParticipantView, UiCommand};
use crate::state::submission::SubmissionPhase;
use crate::utils::errors::RegistrationError;
use crate::utils::helpers::{format_birth_date, truncate_text};

const DESCRIPTION_WIDTH: usize = 160;

/// Catalog entries with their register links
pub fn render_landing(catalog: &dyn CatalogProvider, i18n: &I18n, lang: &str) -> String {
    let mut lines = vec![
        i18n.t("landing.title", lang, None),
        i18n.t("landing.subtitle", lang, None),
        String::new(),
    ];

    for entry in catalog.list_entries() {
        let mut params = TranslationParams::new();
        params.insert("title".to_string(), entry.title.clone());
        params.insert("link".to_string(), entry.link.clone().unwrap_or_default());
        lines.push(format!("  {}", i18n.t("landing.entry", lang, Some(&params))));
    }

    lines.join("\n")
}

pub fn render_form(view: &FormView, i18n: &I18n, lang: &str) -> String {
    let mut lines = vec![format!("== {} ==", view.entry.title)];

    let description = view.entry.description_or_empty();
    if !description.is_empty() {
        lines.push(truncate_text(description, DESCRIPTION_WIDTH));
    }
    lines.push(match &view.entry.image_ref {
        Some(image) => format!("[{}]", image),
        None => format!("[{}]", i18n.t("form.no_image", lang, None)),
    });

    lines.push(format!("{}:", i18n.t("form.prizes", lang, None)));
    if view.entry.prizes.is_empty() {
        lines.push(format!("  {}", i18n.t("form.no_prizes", lang, None)));
    } else {
        lines.extend(view.entry.prizes.iter().map(|prize| format!("  * {}", prize)));
    }

    if view.phase == SubmissionPhase::Done {
        lines.push(String::new());
        lines.extend(view.success_message.iter().cloned());
        lines.push(i18n.t("success.thank_you", lang, None));
        lines.push(format!("({})", i18n.t("success.home", lang, None)));
        return lines.join("\n");
    }

    lines.push(if view.seats_left == 0 {
        i18n.t("seats.none", lang, None)
    } else {
        i18n.tp("seats.left", lang, i64::from(view.seats_left), None)
    });

    match view.mode {
        FormMode::NoForm => {
            lines.push(i18n.t("no_form.intro", lang, None));
            lines.push(format!("{}:", i18n.t("no_form.follow", lang, None)));
            lines.extend(view.social_links.iter().map(|link| format!("  {} - {}", link.label, link.url)));
            let mark = if view.agreed { "x" } else { " " };
            lines.push(format!("[{}] {}", mark, i18n.t("no_form.agreement", lang, None)));
        }
        FormMode::Standard | FormMode::Team => {
            for participant in &view.participants {
                lines.push(String::new());
                lines.extend(render_participant(participant, i18n, lang));
            }
            lines.push(format!("{}: {}", i18n.t("form.direction", lang, None), view.direction_input));
        }
    }

    if let Some(error) = &view.error {
        lines.push(format!("! {}", error));
    }

    let submit_key = if view.mode == FormMode::NoForm {
        "no_form.continue"
    } else if view.submit_enabled {
        "form.submit"
    } else {
        "form.submit_busy"
    };
    lines.push(format!("<{}>", i18n.t(submit_key, lang, None)));

    lines.join("\n")
}

fn render_participant(participant: &ParticipantView, i18n: &I18n, lang: &str) -> Vec<String> {
    let section_key = match participant.role {
        Role::Primary => "form.primary_section",
        Role::Partner => "form.partner_section",
    };
    let person = &participant.person;
    let label = |field: &str| i18n.t(&format!("form.labels.{}", field), lang, None);

    let district = if participant.district_enabled {
        person.district.clone()
    } else {
        format!("({})", i18n.t("form.district_disabled", lang, None))
    };

    vec![
        format!("-- {} --", i18n.t(section_key, lang, None)),
        format!("  {}: {}", label("first_name"), person.first_name),
        format!("  {}: {}", label("last_name"), person.last_name),
        format!("  {}: {}", label("phone_number"), person.phone_number),
        format!(
            "  {}: {}",
            label("birth_date"),
            person.birth_date.map(format_birth_date).unwrap_or_default()
        ),
        format!("  {}: {}", label("email"), person.email),
        format!("  {}: {}", label("study_place"), person.study_place),
        format!("  {}: {}", label("region"), person.region),
        format!("  {}: {}", label("district"), district),
    ]
}

pub fn render_regions(regions: &[Region], lang: &str) -> String {
    regions
        .iter()
        .map(|region| format!("{:>3}  {}", region.id, region.name.get(lang)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_districts(districts: &[District], i18n: &I18n, lang: &str) -> String {
    if districts.is_empty() {
        return i18n.t("form.district_disabled", lang, None);
    }
    districts
        .iter()
        .map(|district| format!("{:>3}  {}", district.id, district.name.get(lang)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Host-side text of a UI command; navigation is handled by the session
pub fn render_command(command: &UiCommand, i18n: &I18n, lang: &str) -> Option<String> {
    match command {
        UiCommand::ShowAlert(text) => Some(format!("[!] {}", text)),
        UiCommand::Navigate(url) => Some(i18n.t_with("host.navigate", lang, "url", url)),
        UiCommand::FocusFirstName => Some(format!("> {}", i18n.t("form.labels.first_name", lang, None))),
        UiCommand::NavigateBack | UiCommand::NavigateHome => None,
    }
}

/// User-facing text of a recoverable error
pub fn describe_error(error: &RegistrationError, i18n: &I18n, lang: &str) -> String {
    match error {
        RegistrationError::Validation(validation) => i18n.t(&validation.message_key(), lang, None),
        RegistrationError::SeatsExhausted { .. } => i18n.t("errors.seats_exhausted", lang, None),
        RegistrationError::AgreementRequired => i18n.t("errors.agreement_required", lang, None),
        RegistrationError::SubmissionInFlight => i18n.t("errors.in_flight", lang, None),
        RegistrationError::AlreadySubmitted => i18n.t("errors.already_submitted", lang, None),
        RegistrationError::DistrictSelectorDisabled => i18n.t("errors.district_disabled", lang, None),
        RegistrationError::UnknownRegion { region_id } => i18n.t_with("errors.unknown_region", lang, "id", region_id),
        RegistrationError::UnknownDistrict { district_id } => {
            i18n.t_with("errors.unknown_district", lang, "id", district_id)
        }
        RegistrationError::InvalidInput(input) => i18n.t_with("host.unknown_command", lang, "input", input),
        other => other.to_string(),
    }
}
